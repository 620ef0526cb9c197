//! SII decode engine: loading, decoding, worker offload and artifact handling.
mod artifact;
mod decode;
mod dispatch;
mod engine;
mod loader;
mod persist;
mod scsc;
mod types;
mod worker;

pub use artifact::{Artifact, ArtifactStore};
pub use decode::{detect_file_type, DecodeError, Decoder, FileType, SiiDecoder};
pub use dispatch::{DecodeDispatcher, DispatchMode};
pub use engine::{EngineEvents, EngineHandle, EngineSettings};
pub use loader::{FileSource, FsFileSource, MemoryFileSource};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use scsc::ScscFile;
pub use types::{DecodeResult, EngineEvent, ReadError, ReadFailureKind, SelectionId};
pub use worker::{WorkerChannel, WorkerResponse, UNKNOWN_ERROR};

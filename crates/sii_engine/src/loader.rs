use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;
use pipeline_logging::pipeline_trace;

use crate::{ReadError, ReadFailureKind};

/// The Loader: turns a file handle into the file's full contents.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    async fn read(&self, handle: &str) -> Result<Bytes, ReadError>;
}

/// Reads handles as paths, optionally relative to a base directory.
#[derive(Debug, Clone, Default)]
pub struct FsFileSource {
    base_dir: Option<PathBuf>,
}

impl FsFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, handle: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(handle),
            None => PathBuf::from(handle),
        }
    }
}

#[async_trait::async_trait]
impl FileSource for FsFileSource {
    async fn read(&self, handle: &str) -> Result<Bytes, ReadError> {
        let path = self.resolve(handle);
        let content = tokio::fs::read(&path)
            .await
            .map_err(|err| map_io_error(&path, err))?;
        pipeline_trace!("read {} bytes from {:?}", content.len(), path);
        Ok(Bytes::from(content))
    }
}

fn map_io_error(path: &std::path::Path, err: io::Error) -> ReadError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ReadFailureKind::NotFound,
        io::ErrorKind::PermissionDenied => ReadFailureKind::PermissionDenied,
        _ => ReadFailureKind::Io,
    };
    ReadError::new(kind, format!("{}: {err}", path.display()))
}

/// In-memory file source keyed by handle, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryFileSource {
    files: RwLock<HashMap<String, Bytes>>,
}

impl MemoryFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, handle: impl Into<String>, content: impl Into<Bytes>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.into(), content.into());
    }

    pub fn remove(&self, handle: &str) -> Option<Bytes> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(handle)
    }
}

#[async_trait::async_trait]
impl FileSource for MemoryFileSource {
    async fn read(&self, handle: &str) -> Result<Bytes, ReadError> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files
            .get(handle)
            .cloned()
            .ok_or_else(|| ReadError::new(ReadFailureKind::NotFound, handle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_source_keeps_working_after_a_writer_panicked() {
        let source = std::sync::Arc::new(MemoryFileSource::new());
        let poisoner = source.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.files.write();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(source.files.is_poisoned());

        source.insert("late.sii", &b"SiiN"[..]);
        assert_eq!(source.read("late.sii").await, Ok(Bytes::from_static(b"SiiN")));
        assert_eq!(source.remove("late.sii"), Some(Bytes::from_static(b"SiiN")));
    }
}

use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use futures_util::FutureExt;
use pipeline_logging::{pipeline_debug, pipeline_error, pipeline_warn};

use crate::worker::panic_message;
use crate::{
    DecodeDispatcher, Decoder, DispatchMode, EngineEvent, FileSource, ReadError, ReadFailureKind,
    SelectionId,
};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub dispatch_mode: DispatchMode,
    /// Tokio worker threads; `None` uses the runtime default.
    pub worker_threads: Option<usize>,
}

enum EngineCommand {
    Load {
        selection_id: SelectionId,
        handle: String,
    },
    Decode {
        selection_id: SelectionId,
        bytes: Bytes,
    },
}

/// Sends load and decode requests to a background runtime.
///
/// Requests run concurrently and complete in any order; every event carries
/// the selection id it was issued for.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of an [`EngineHandle`].
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        settings: EngineSettings,
        source: Arc<dyn FileSource>,
        decoder: Arc<dyn Decoder>,
    ) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let dispatcher = DecodeDispatcher::new(settings.dispatch_mode, decoder);

        thread::spawn(move || {
            let runtime = match build_runtime(&settings) {
                Ok(runtime) => runtime,
                Err(err) => {
                    pipeline_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let dispatcher = dispatcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), &dispatcher, command, event_tx).await;
                });
            }
            pipeline_debug!("engine command channel closed");
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn load(&self, selection_id: SelectionId, handle: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Load {
            selection_id,
            handle: handle.into(),
        });
    }

    pub fn decode(&self, selection_id: SelectionId, bytes: Bytes) {
        let _ = self.cmd_tx.send(EngineCommand::Decode {
            selection_id,
            bytes,
        });
    }
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn build_runtime(settings: &EngineSettings) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = settings.worker_threads {
        builder.worker_threads(threads.max(1));
    }
    builder.thread_name("sii-engine").build()
}

async fn handle_command(
    source: &dyn FileSource,
    dispatcher: &DecodeDispatcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Load {
            selection_id,
            handle,
        } => EngineEvent::Loaded {
            selection_id,
            result: read_contained(source, selection_id, &handle).await,
        },
        EngineCommand::Decode {
            selection_id,
            bytes,
        } => EngineEvent::Decoded {
            selection_id,
            result: dispatcher.dispatch(bytes).await,
        },
    };
    let _ = event_tx.send(event);
}

/// Reads through the source, turning a panic into an `Io` read failure so the
/// selection still settles.
async fn read_contained(
    source: &dyn FileSource,
    selection_id: SelectionId,
    handle: &str,
) -> Result<Bytes, ReadError> {
    match AssertUnwindSafe(source.read(handle)).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => {
            pipeline_warn!(selection = selection_id; "file source panicked reading {}", handle);
            Err(ReadError::new(ReadFailureKind::Io, panic_message(payload)))
        }
    }
}

use std::sync::Arc;

use bytes::Bytes;
use pipeline_logging::pipeline_debug;

use crate::worker::{self, WorkerChannel};
use crate::{DecodeResult, Decoder};

/// Where the decode engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// On the calling task.
    InProcess,
    /// Through the [`WorkerChannel`], off the calling task.
    #[default]
    Worker,
}

/// The Decode Dispatcher: one engine call per buffer, normalized to a [`DecodeResult`].
#[derive(Clone)]
pub struct DecodeDispatcher {
    mode: DispatchMode,
    decoder: Arc<dyn Decoder>,
    worker: WorkerChannel,
}

impl DecodeDispatcher {
    pub fn new(mode: DispatchMode, decoder: Arc<dyn Decoder>) -> Self {
        let worker = WorkerChannel::new(decoder.clone());
        Self {
            mode,
            decoder,
            worker,
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub async fn dispatch(&self, bytes: Bytes) -> DecodeResult {
        pipeline_debug!("dispatching {} bytes ({:?})", bytes.len(), self.mode);
        let response = match self.mode {
            DispatchMode::InProcess => worker::run(self.decoder.as_ref(), &bytes),
            DispatchMode::Worker => self.worker.submit(bytes).await,
        };
        DecodeResult::from(response)
    }
}

//! Worker Channel: runs the decode engine off the caller's thread.
//!
//! Each submission is executed on tokio's blocking pool. Engine errors and
//! panics are caught at this boundary and come back as
//! [`WorkerResponse::Error`]; nothing unwinds into the submitting task.
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bytes::Bytes;
use pipeline_logging::pipeline_warn;
use serde::{Deserialize, Serialize};

use crate::Decoder;

/// Message used when a failure carries no description.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Tagged reply: `{"status":"ok","decoded":..}` or `{"status":"error","error":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WorkerResponse {
    Ok { decoded: String },
    Error { error: String },
}

impl WorkerResponse {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            WorkerResponse::Error {
                error: UNKNOWN_ERROR.to_string(),
            }
        } else {
            WorkerResponse::Error { error: message }
        }
    }
}

#[derive(Clone)]
pub struct WorkerChannel {
    decoder: Arc<dyn Decoder>,
}

impl WorkerChannel {
    pub fn new(decoder: Arc<dyn Decoder>) -> Self {
        Self { decoder }
    }

    /// Runs one decode on the blocking pool. Must be called inside a tokio runtime.
    pub async fn submit(&self, bytes: Bytes) -> WorkerResponse {
        let decoder = self.decoder.clone();
        match tokio::task::spawn_blocking(move || run(decoder.as_ref(), &bytes)).await {
            Ok(response) => response,
            Err(err) => {
                pipeline_warn!("decode worker did not complete: {}", err);
                let message = if err.is_panic() {
                    panic_message(err.into_panic())
                } else {
                    UNKNOWN_ERROR.to_string()
                };
                WorkerResponse::error(message)
            }
        }
    }
}

/// Calls the engine once and converts any outcome, including a panic, into a response.
pub(crate) fn run(decoder: &dyn Decoder, bytes: &[u8]) -> WorkerResponse {
    match panic::catch_unwind(AssertUnwindSafe(|| decoder.decode(bytes))) {
        Ok(Ok(decoded)) => WorkerResponse::Ok { decoded },
        Ok(Err(err)) => WorkerResponse::error(err.to_string()),
        Err(payload) => {
            pipeline_warn!("decode engine panicked");
            WorkerResponse::error(panic_message(payload))
        }
    }
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_ERROR.to_string()
    }
}

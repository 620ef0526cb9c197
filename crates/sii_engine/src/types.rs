use std::fmt;

use bytes::Bytes;

use crate::worker::WorkerResponse;

pub type SelectionId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Loaded {
        selection_id: SelectionId,
        result: Result<Bytes, ReadError>,
    },
    Decoded {
        selection_id: SelectionId,
        result: DecodeResult,
    },
}

/// Normalized outcome of one decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    Ok(String),
    Error(String),
}

impl From<WorkerResponse> for DecodeResult {
    fn from(response: WorkerResponse) -> Self {
        match response {
            WorkerResponse::Ok { decoded } => DecodeResult::Ok(decoded),
            WorkerResponse::Error { error } => DecodeResult::Error(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub kind: ReadFailureKind,
    pub message: String,
}

impl ReadError {
    pub(crate) fn new(kind: ReadFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ReadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailureKind {
    NotFound,
    PermissionDenied,
    Io,
}

impl fmt::Display for ReadFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadFailureKind::NotFound => write!(f, "file not found"),
            ReadFailureKind::PermissionDenied => write!(f, "permission denied"),
            ReadFailureKind::Io => write!(f, "read failed"),
        }
    }
}

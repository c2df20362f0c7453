//! Response envelope for service layers built on the repository.

use serde::{Deserialize, Serialize};

use docrepo_core::error::{AppError, ErrorKind};

/// Uniform result envelope: an error flag, a message, a status code and an
/// optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseModel<T = serde_json::Value> {
    /// Whether the call failed.
    pub error: bool,
    /// Human-readable message.
    pub message: String,
    /// HTTP-style status code.
    pub code: u16,
    /// Payload, if any.
    pub data: Option<T>,
}

impl<T> ResponseModel<T> {
    /// A successful response carrying `data`.
    pub fn success(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            error: false,
            message: message.into(),
            code,
            data: Some(data),
        }
    }

    /// A failed response derived from a repository error.
    pub fn failure(err: &AppError) -> Self {
        Self {
            error: true,
            message: err.message.clone(),
            code: status_code(err.kind),
            data: None,
        }
    }
}

/// Map an error kind to the status code reported to callers.
pub fn status_code(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::InvalidIdentifier => 400,
        ErrorKind::NotFound => 404,
        _ => 500,
    }
}

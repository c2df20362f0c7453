//! Unified error types for DocRepo.
//!
//! Store backends and repository operations map every failure into
//! [`AppError`] so callers can branch on [`ErrorKind`] instead of driver
//! specific error types.

use std::fmt;
use thiserror::Error;

/// Message used for store calls that exceeded their execution bound.
const DEADLINE_EXCEEDED: &str = "deadline exceeded";

/// Error kind categorization shared by every repository operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A caller-supplied string identifier is not a well-formed native identifier.
    InvalidIdentifier,
    /// No stored document matched the identifier or filter.
    NotFound,
    /// A stored document could not be materialized into the target entity type.
    Decode,
    /// Any other store-side fault (timeout, connectivity, constraint violation).
    Persistence,
    /// An entity could not be encoded into its field/value form.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier => write!(f, "INVALID_IDENTIFIER"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Decode => write!(f, "DECODE"),
            Self::Persistence => write!(f, "PERSISTENCE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout DocRepo.
///
/// Errors are never retried by the repository layer; they are returned to the
/// immediate caller, who owns any retry policy.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Set only by [`AppError::deadline_exceeded`].
    timed_out: bool,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            timed_out: false,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
            timed_out: false,
        }
    }

    /// Create an invalid-identifier error.
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidIdentifier, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence, message)
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create the persistence error reported when a store call runs past its bound.
    pub fn deadline_exceeded(operation: &str) -> Self {
        Self {
            timed_out: true,
            ..Self::persistence(format!("{operation}: {DEADLINE_EXCEEDED}"))
        }
    }

    /// Whether this error reports an invalid identifier.
    pub fn is_invalid_identifier(&self) -> bool {
        self.kind == ErrorKind::InvalidIdentifier
    }

    /// Whether this error reports a missing document.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Whether this error reports a document that could not be decoded.
    pub fn is_decode(&self) -> bool {
        self.kind == ErrorKind::Decode
    }

    /// Whether this error reports a store call that exceeded its bound.
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
            timed_out: self.timed_out,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Failure of a multi-document query.
///
/// Carries the entities decoded before the cursor failed, so callers that
/// tolerate partial results can still use them.
#[derive(Debug, Error)]
#[error("{error} ({} documents read before failure)", partial.len())]
pub struct QueryFailure<T: fmt::Debug> {
    /// Entities decoded before the failure.
    pub partial: Vec<T>,
    /// The cursor or query failure.
    #[source]
    pub error: AppError,
}

impl<T: fmt::Debug> QueryFailure<T> {
    /// Create a failure that carries no partial results.
    pub fn empty(error: AppError) -> Self {
        Self {
            partial: Vec::new(),
            error,
        }
    }

    /// Split the failure into its partial results and its error.
    pub fn into_parts(self) -> (Vec<T>, AppError) {
        (self.partial, self.error)
    }
}

impl<T: fmt::Debug> From<QueryFailure<T>> for AppError {
    fn from(failure: QueryFailure<T>) -> Self {
        failure.error
    }
}

//! Convenience result type aliases for DocRepo.

use crate::error::{AppError, QueryFailure};

/// A specialized `Result` type for DocRepo operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, AppError>` explicitly.
pub type AppResult<T> = Result<T, AppError>;

/// Result of a multi-document query. On failure the documents decoded
/// before the cursor broke are carried in the error.
pub type QueryResult<T> = Result<Vec<T>, QueryFailure<T>>;

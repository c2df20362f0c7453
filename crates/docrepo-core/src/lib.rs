//! # docrepo-core
//!
//! Core crate for DocRepo. Contains the document capability contract,
//! the collection accessor seam, configuration schemas, the native
//! identifier codec, filter/find option types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DocRepo crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind, QueryFailure};
pub use result::{AppResult, QueryResult};

//! Core type definitions used across the DocRepo workspace.

pub mod filter;
pub mod find_options;
pub mod object_id;
pub mod patch;
pub mod stored;
pub mod timestamp;

pub use filter::{Filter, FilterField, FilterOp};
pub use find_options::{FindOptions, SortDirection, SortField};
pub use object_id::ObjectId;
pub use patch::UpdatePatch;
pub use stored::{RawDocument, StoredDocument};
pub use timestamp::audit_now;

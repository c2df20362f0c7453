//! # docrepo-entity
//!
//! Building blocks for entity types stored through DocRepo: the
//! [`DmlModel`] identity/audit base, the [`impl_document!`] delegation
//! macro and the [`ResponseModel`] envelope.

pub mod base;
pub mod response;

pub use base::DmlModel;
pub use docrepo_core::traits::Document;
pub use response::ResponseModel;

//! # docrepo-repository
//!
//! Generic repository operations over any [`Document`](docrepo_core::traits::Document):
//! one implementation per verb, the partial-update diff engine, and the
//! [`DocumentRepository`] facade implementing
//! [`Repository`](docrepo_core::traits::Repository).
//!
//! Every store call runs under the bound held by [`RepositoryContext`] and is
//! never retried.

pub mod cmd;
pub mod context;
pub mod decode;
pub mod diff;
pub mod query;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use cmd::{CreateRepository, DeleteRepository, UpdateRepository};
pub use context::RepositoryContext;
pub use query::{GetAllRepository, GetByFilterRepository, GetByIdRepository};
pub use repository::DocumentRepository;

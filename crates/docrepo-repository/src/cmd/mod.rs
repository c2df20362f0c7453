//! Write operations.

pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateRepository;
pub use delete::DeleteRepository;
pub use update::UpdateRepository;

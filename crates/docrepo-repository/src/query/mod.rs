//! Read operations.

pub mod get_all;
pub mod get_by_filter;
pub mod get_by_id;

pub use get_all::GetAllRepository;
pub use get_by_filter::GetByFilterRepository;
pub use get_by_id::GetByIdRepository;

//! MongoDB backend built on the official `mongodb` driver.

pub mod convert;
pub mod store;

pub use store::{MongoCollection, MongoCursor, MongoStore};

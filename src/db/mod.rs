pub mod actions;
pub mod gateway;

pub use gateway::{Gateway, Record, SqlParam, StorageError};

//! Storage backends implementing [`PersistenceAdapter`](crate::domain::ports::PersistenceAdapter).

pub mod in_memory;
pub mod json_file;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

//! Persistence capability for the review store

mod kv;

pub use kv::{FileKvStore, KvStore, Result, StorageError};

pub mod connection;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod slots;

pub use error::StorageError;
pub use repositories::{LocalStorageRepository, StorageEntry, STORAGE_SCHEMA_VERSION};
pub use slots::StoredValue;

mod file_store;
mod key_value;
mod last_fix_store;

pub use file_store::FileStore;
pub use key_value::{KeyValueStore, StoreError};
pub use last_fix_store::LastFixStore;

#[cfg(test)]
pub(crate) use last_fix_store::tests::MemoryStore;

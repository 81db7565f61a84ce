//! Storage layer: atomic file writes and string key-value stores.

mod atomic_json;
mod key_value_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use key_value_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

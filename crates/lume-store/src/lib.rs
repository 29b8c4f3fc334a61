//! Lume Store: persistence for saved edits.
//!
//! Saved edits are a JSON array kept under a single key of an injected
//! [`KeyValueStore`]. The repository never touches the storage mechanism
//! directly, so the same code runs over a file directory or memory.

mod error;
mod id;
mod kv;
mod repository;

pub use error::StoreError;
pub use id::IdGenerator;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{SAVED_EDITS_KEY, SavedEditRepository};

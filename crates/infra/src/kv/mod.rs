//! Durable key-value boundary.
//!
//! Values are JSON text under string keys, scoped to one profile. Every
//! write replaces the whole value; there is no cross-key transaction.

pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileStore;
pub use in_memory::InMemoryStore;
pub use r#trait::{KeyValueStore, StorageError};

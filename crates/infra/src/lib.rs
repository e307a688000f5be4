//! Infrastructure layer: durable storage and the stores built on it.

pub mod cart_store;
pub mod kv;
pub mod persisted;
pub mod product_store;


pub use cart_store::CartStore;
pub use kv::{FileStore, InMemoryStore, KeyValueStore, StorageError};
pub use product_store::ProductStore;

//! JSON-array collections over a [`KeyValueStore`], with corruption recovery.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::kv::{KeyValueStore, StorageError};

/// Uploaded products, in upload order.
pub const UPLOADED_PRODUCTS_KEY: &str = "uploadedProducts";
/// Runtime overrides of catalog products.
pub const EDITED_ORIGINAL_PRODUCTS_KEY: &str = "editedOriginalProducts";
/// Cart lines.
pub const CART_KEY: &str = "cart";

/// Load the array stored at `key`.
///
/// Absent keys and read failures yield an empty collection. Malformed JSON,
/// a non-array value or an element of the wrong shape counts as corruption:
/// the key is cleared and an empty collection is returned.
pub fn load_collection<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::error!(key, error = %err, "failed to read persisted collection");
            return Vec::new();
        }
    };

    match decode::<T>(&raw) {
        Ok(items) => items,
        Err(reason) => {
            tracing::warn!(key, %reason, "discarding corrupted persisted collection");
            if let Err(err) = store.remove(key) {
                tracing::error!(key, error = %err, "failed to clear corrupted collection");
            }
            Vec::new()
        }
    }
}

/// Serialize `items` as a JSON array and write it to `key`.
pub fn save_collection<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let payload = serde_json::to_string(items)?;
    store.set(key, &payload)
}

/// [`save_collection`], logging instead of returning the failure.
///
/// Returns whether the write landed.
pub fn persist<T, S>(store: &S, key: &str, items: &[T]) -> bool
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    match save_collection(store, key, items) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(
                key,
                error = %err,
                "failed to persist collection; change kept in memory only"
            );
            false
        }
    }
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| format!("invalid json: {e}"))?;
    if !value.is_array() {
        return Err("expected a JSON array".to_string());
    }
    serde_json::from_value(value).map_err(|e| format!("unexpected element shape: {e}"))
}

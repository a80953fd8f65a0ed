use std::{
    collections::HashMap,
    sync::RwLock,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{CoreError, Result};

/// Keys under which storefront state is persisted.
pub mod keys {
    pub const SAVED_CONTACT: &str = "decora_saved_contact";
    pub const SERVICE_REQUESTS: &str = "decora_service_requests";
    pub const CART: &str = "decora_cart";
    pub const WISHLIST: &str = "decora_wishlist";
    pub const PRODUCTS: &str = "decora_products";
    pub const VENDOR_PRODUCTS: &str = "decora_vendor_products";
}

/// Abstraction over the host's synchronous key-value storage. One logical
/// writer at a time; values are opaque JSON documents.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Storage("store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Reads and parses a stored document, falling back to the default when the
/// key is absent or the stored JSON no longer parses.
pub(crate) fn read_or_default<T>(store: &dyn KeyValueStore, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        None => Ok(T::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!("discarding corrupt document under `{}`: {}", key, err);
                Ok(T::default())
            }
        },
    }
}

/// Reads and parses a stored document, propagating parse failures. Used for
/// records that must never be silently discarded.
pub(crate) fn read_strict<T>(store: &dyn KeyValueStore, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        None => Ok(T::default()),
        Some(raw) => serde_json::from_str(&raw).map_err(|err| CoreError::Serde(err.to_string())),
    }
}

pub(crate) fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    store.set(key, &json)
}

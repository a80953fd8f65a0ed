use std::sync::Arc;

use uuid::Uuid;

use crate::storage::{keys, read_or_default, write_json, KeyValueStore};
use crate::Result;

/// Wishlist with set semantics over product ids.
#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn KeyValueStore>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn ids(&self) -> Result<Vec<Uuid>> {
        read_or_default(self.store.as_ref(), keys::WISHLIST)
    }

    /// Adds the product id; already-present ids are left alone.
    pub fn add(&self, product_id: Uuid) -> Result<()> {
        let mut ids = self.ids()?;
        if !ids.contains(&product_id) {
            ids.push(product_id);
            self.write(&ids)?;
        }
        Ok(())
    }

    pub fn remove(&self, product_id: Uuid) -> Result<()> {
        let mut ids = self.ids()?;
        ids.retain(|id| *id != product_id);
        self.write(&ids)
    }

    pub fn contains(&self, product_id: Uuid) -> Result<bool> {
        Ok(self.ids()?.contains(&product_id))
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::WISHLIST)
    }

    fn write(&self, ids: &[Uuid]) -> Result<()> {
        write_json(self.store.as_ref(), keys::WISHLIST, &ids)
    }
}

use std::collections::BTreeMap;
use std::sync::Arc;

use uuid::Uuid;

use decora_domain::{Product, ProductDraft, VendorStats};

use crate::product_service::{apply_draft, instantiate};
use crate::storage::{keys, read_or_default, write_json, KeyValueStore};
use crate::time::Clock;
use crate::{CoreError, Result};

/// Shelves for marketplace makers. All vendors share one stored document
/// keyed by slug; a vendor with no shelf simply has no products yet.
#[derive(Clone)]
pub struct VendorService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

type Shelves = BTreeMap<String, Vec<Product>>;

impl VendorService {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn products(&self, vendor: &str) -> Result<Vec<Product>> {
        Ok(self.shelves()?.remove(vendor).unwrap_or_default())
    }

    pub fn add(&self, vendor: &str, draft: ProductDraft) -> Result<Product> {
        let product = instantiate(draft, vendor, self.clock.as_ref());
        let mut shelves = self.shelves()?;
        shelves
            .entry(vendor.to_string())
            .or_default()
            .push(product.clone());
        self.write(&shelves)?;
        Ok(product)
    }

    pub fn update(&self, vendor: &str, id: Uuid, draft: ProductDraft) -> Result<Product> {
        let mut shelves = self.shelves()?;
        let product = shelves
            .get_mut(vendor)
            .and_then(|shelf| shelf.iter_mut().find(|product| product.id == id))
            .ok_or(CoreError::UnknownProduct(id))?;
        apply_draft(product, draft);
        let updated = product.clone();
        self.write(&shelves)?;
        Ok(updated)
    }

    pub fn delete(&self, vendor: &str, id: Uuid) -> Result<()> {
        let mut shelves = self.shelves()?;
        let shelf = shelves
            .get_mut(vendor)
            .ok_or(CoreError::UnknownProduct(id))?;
        let before = shelf.len();
        shelf.retain(|product| product.id != id);
        if shelf.len() == before {
            return Err(CoreError::UnknownProduct(id));
        }
        self.write(&shelves)
    }

    /// Seller-dashboard rollup; value weighs each price by units on hand.
    pub fn vendor_stats(&self, vendor: &str) -> Result<VendorStats> {
        let products = self.products(vendor)?;
        let mut stats = VendorStats {
            total_products: products.len(),
            ..VendorStats::default()
        };
        for product in &products {
            stats.total_value += product.price * product.stock as f64;
            stats.total_stock += product.stock as u64;
            if !product.category.is_empty() {
                *stats.by_category.entry(product.category.clone()).or_insert(0) += 1;
            }
        }
        Ok(stats)
    }

    fn shelves(&self) -> Result<Shelves> {
        read_or_default(self.store.as_ref(), keys::VENDOR_PRODUCTS)
    }

    fn write(&self, shelves: &Shelves) -> Result<()> {
        write_json(self.store.as_ref(), keys::VENDOR_PRODUCTS, shelves)
    }
}

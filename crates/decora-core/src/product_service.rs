use std::sync::Arc;

use uuid::Uuid;

use decora_domain::{InventoryStats, Product, ProductDraft, ProductFilter, ProductSort};

use crate::storage::{keys, read_or_default, write_json, KeyValueStore};
use crate::time::Clock;
use crate::{CoreError, Result};

/// Vendor slug for pieces sold by the house itself.
pub const HOUSE_VENDOR: &str = "decora";

/// The house product shelf: listing, editing, shop search, and the admin
/// inventory rollup.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl ProductService {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// House products only; anything else that leaked into the document is
    /// filtered out rather than surfaced.
    pub fn list(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = read_or_default(self.store.as_ref(), keys::PRODUCTS)?;
        Ok(products
            .into_iter()
            .filter(|product| product.vendor == HOUSE_VENDOR)
            .collect())
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.list()?.into_iter().find(|product| product.id == id))
    }

    /// Lists a new house product. Identity, vendor, and listing date are
    /// assigned here; drafts never carry them.
    pub fn add(&self, draft: ProductDraft) -> Result<Product> {
        let product = instantiate(draft, HOUSE_VENDOR, self.clock.as_ref());
        let mut products = self.shelf()?;
        products.push(product.clone());
        self.write(&products)?;
        Ok(product)
    }

    /// Replaces every editable field from the draft, keeping identity,
    /// vendor, and listing date.
    pub fn update(&self, id: Uuid, draft: ProductDraft) -> Result<Product> {
        let mut products = self.shelf()?;
        let product = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(CoreError::UnknownProduct(id))?;
        apply_draft(product, draft);
        let updated = product.clone();
        self.write(&products)?;
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut products = self.shelf()?;
        let before = products.len();
        products.retain(|product| product.id != id);
        if products.len() == before {
            return Err(CoreError::UnknownProduct(id));
        }
        self.write(&products)
    }

    /// Shop search: applies the filter conjunction, then the ordering.
    pub fn search(&self, filter: &ProductFilter, sort: ProductSort) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .list()?
            .into_iter()
            .filter(|product| filter.matches(product))
            .collect();
        sort.apply(&mut products);
        Ok(products)
    }

    pub fn inventory_stats(&self) -> Result<InventoryStats> {
        let products = self.list()?;
        let mut stats = InventoryStats {
            total_products: products.len(),
            ..InventoryStats::default()
        };
        for product in &products {
            stats.total_value += product.price;
            if !product.category.is_empty() {
                *stats.by_category.entry(product.category.clone()).or_insert(0) += 1;
            }
            if !product.room.is_empty() {
                *stats.by_room.entry(product.room.clone()).or_insert(0) += 1;
            }
        }
        Ok(stats)
    }

    fn shelf(&self) -> Result<Vec<Product>> {
        read_or_default(self.store.as_ref(), keys::PRODUCTS)
    }

    fn write(&self, products: &[Product]) -> Result<()> {
        write_json(self.store.as_ref(), keys::PRODUCTS, &products)
    }
}

/// Builds a full product from a draft. The vendor slug is also stamped into
/// the tags so shelf provenance survives exports.
pub(crate) fn instantiate(draft: ProductDraft, vendor: &str, clock: &dyn Clock) -> Product {
    let mut tags = draft.tags;
    if !tags.iter().any(|tag| tag == vendor) {
        tags.push(vendor.to_string());
    }
    Product {
        id: Uuid::new_v4(),
        title: draft.title,
        description: draft.description,
        price: draft.price,
        category: draft.category,
        room: draft.room,
        vendor: vendor.to_string(),
        tags,
        stock: draft.stock,
        color: draft.color,
        materials: draft.materials,
        collection: draft.collection,
        shipping: draft.shipping,
        badge: draft.badge,
        image_url: draft.image_url,
        created_at: clock.now(),
    }
}

pub(crate) fn apply_draft(product: &mut Product, draft: ProductDraft) {
    product.title = draft.title;
    product.description = draft.description;
    product.price = draft.price;
    product.category = draft.category;
    product.room = draft.room;
    product.tags = draft.tags;
    product.stock = draft.stock;
    product.color = draft.color;
    product.materials = draft.materials;
    product.collection = draft.collection;
    product.shipping = draft.shipping;
    product.badge = draft.badge;
    product.image_url = draft.image_url;
}

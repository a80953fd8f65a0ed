use std::sync::Arc;

use uuid::Uuid;

use decora_domain::{CartLine, Product};

use crate::storage::{keys, read_or_default, write_json, KeyValueStore};
use crate::Result;

/// Shopping cart over the shared key-value store. Lines are keyed by
/// product; adding an existing product bumps its quantity.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn KeyValueStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn lines(&self) -> Result<Vec<CartLine>> {
        read_or_default(self.store.as_ref(), keys::CART)
    }

    /// Adds one unit of the product, merging with an existing line.
    /// Returns the quantity now in the cart for this product.
    pub fn add(&self, product: &Product) -> Result<u32> {
        let mut lines = self.lines()?;
        let quantity = match lines.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => {
                line.quantity += 1;
                line.quantity
            }
            None => {
                lines.push(CartLine::for_product(product));
                1
            }
        };
        self.write(&lines)?;
        Ok(quantity)
    }

    /// Sets the quantity for a product; zero or less removes the line.
    pub fn update_quantity(&self, product_id: Uuid, quantity: i64) -> Result<()> {
        let mut lines = self.lines()?;
        if quantity <= 0 {
            lines.retain(|line| line.product_id != product_id);
        } else if let Some(line) = lines.iter_mut().find(|line| line.product_id == product_id) {
            line.quantity = quantity as u32;
        }
        self.write(&lines)
    }

    pub fn remove(&self, product_id: Uuid) -> Result<()> {
        let mut lines = self.lines()?;
        lines.retain(|line| line.product_id != product_id);
        self.write(&lines)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::CART)
    }

    /// Sum of unit price times quantity across the cart.
    pub fn total(&self) -> Result<f64> {
        Ok(self.lines()?.iter().map(CartLine::line_total).sum())
    }

    /// Total units in the cart, not distinct products.
    pub fn item_count(&self) -> Result<u32> {
        Ok(self.lines()?.iter().map(|line| line.quantity).sum())
    }

    fn write(&self, lines: &[CartLine]) -> Result<()> {
        write_json(self.store.as_ref(), keys::CART, &lines)
    }
}

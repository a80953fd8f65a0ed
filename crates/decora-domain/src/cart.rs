//! Shopping cart lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::product::Product;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Snapshot of a product in the cart plus the quantity wanted.
pub struct CartLine {
    pub product_id: Uuid,
    pub title: String,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

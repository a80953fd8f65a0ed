//! Retail products, shop filters, and inventory rollups.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// One sellable piece, either from the house shelf or a vendor shelf.
pub struct Product {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub room: String,
    pub vendor: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub materials: String,
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub shipping: ShippingScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Identifiable for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Fields a seller fills in when listing or editing a product. Identity,
/// vendor, and listing date are assigned by the owning service.
pub struct ProductDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub materials: String,
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub shipping: ShippingScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Where a product ships.
pub enum ShippingScope {
    PrOnly,
    UsaOnly,
    #[default]
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Stock-level filter for the shop page.
pub enum Availability {
    #[default]
    All,
    InStock,
    SoldOut,
}

#[derive(Debug, Clone, Default)]
/// Conjunction of optional shop-page predicates; unset fields match anything.
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub availability: Availability,
    pub color: Option<String>,
    pub material: Option<String>,
    pub collection: Option<String>,
    pub shipping: Option<ShippingScope>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let needle = term.trim().to_lowercase();
            if !needle.is_empty() {
                let haystack = format!(
                    "{} {} {}",
                    product.title, product.description, product.category
                )
                .to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
        }
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if product.price > max {
                return false;
            }
        }
        match self.availability {
            Availability::All => {}
            Availability::InStock => {
                if !product.in_stock() {
                    return false;
                }
            }
            Availability::SoldOut => {
                if product.in_stock() {
                    return false;
                }
            }
        }
        if let Some(color) = &self.color {
            if !product.color.eq_ignore_ascii_case(color) {
                return false;
            }
        }
        if let Some(material) = &self.material {
            let needle = material.to_lowercase();
            if !product.materials.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(collection) = &self.collection {
            if product.collection != *collection {
                return false;
            }
        }
        if let Some(shipping) = self.shipping {
            if product.shipping != shipping {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Shop-page orderings. `Featured` keeps shelf order; `BestSelling` floats
/// badged pieces to the front without disturbing relative order.
pub enum ProductSort {
    #[default]
    Featured,
    Newest,
    PriceLowHigh,
    PriceHighLow,
    BestSelling,
}

impl ProductSort {
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            ProductSort::Featured => {}
            ProductSort::Newest => {
                products.sort_by_key(|product| std::cmp::Reverse(product.created_at));
            }
            ProductSort::PriceLowHigh => {
                products.sort_by(|a, b| a.price.total_cmp(&b.price));
            }
            ProductSort::PriceHighLow => {
                products.sort_by(|a, b| b.price.total_cmp(&a.price));
            }
            ProductSort::BestSelling => {
                products.sort_by_key(|product| !has_badge(product, "bestseller"));
            }
        }
    }
}

fn has_badge(product: &Product, badge: &str) -> bool {
    product
        .badge
        .as_deref()
        .map(|value| value.eq_ignore_ascii_case(badge))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// Admin rollup over the house shelf.
pub struct InventoryStats {
    pub total_products: usize,
    pub total_value: f64,
    pub by_category: BTreeMap<String, usize>,
    pub by_room: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
/// Rollup over one vendor shelf; value weighs price by units on hand.
pub struct VendorStats {
    pub total_products: usize,
    pub total_value: f64,
    pub total_stock: u64,
    pub by_category: BTreeMap<String, usize>,
}

//! Catalog definitions for the bookable areas of a home.

use serde::{Deserialize, Serialize};

use crate::common::Labeled;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Describes one bookable area: stable slug, display label, and per-space price.
pub struct AreaDefinition {
    pub id: String,
    pub label: String,
    pub base_price: f64,
    #[serde(default)]
    pub helper: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl AreaDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        base_price: f64,
        helper: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_price,
            helper: helper.into(),
            is_custom: false,
        }
    }

    /// Builds the catch-all area whose description names the actual space.
    pub fn custom(
        id: impl Into<String>,
        label: impl Into<String>,
        base_price: f64,
        helper: impl Into<String>,
    ) -> Self {
        Self {
            is_custom: true,
            ..Self::new(id, label, base_price, helper)
        }
    }
}

impl Labeled for AreaDefinition {
    fn label(&self) -> &str {
        &self.label
    }
}

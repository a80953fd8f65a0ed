//! Shared traits and small helpers used across storefront models.

use uuid::Uuid;

/// Exposes a stable identifier for entities kept in storefront collections.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display label.
pub trait Labeled {
    fn label(&self) -> &str;
}

/// Returns true when the value is empty after trimming whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns true when the value carries non-whitespace content.
pub fn is_filled(value: &str) -> bool {
    !is_blank(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(is_filled(" x "));
    }
}

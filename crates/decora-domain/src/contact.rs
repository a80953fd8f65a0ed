//! Contact details captured on the first wizard step.

use serde::{Deserialize, Serialize};

use crate::common::is_filled;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Contact form state, including the opt-in for remembering the details.
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub save_info: bool,
}

impl ContactInfo {
    /// True when every contact field carries non-whitespace content.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.full_name)
            && is_filled(&self.email)
            && is_filled(&self.phone)
            && is_filled(&self.address)
    }

    /// Snapshot without the opt-in flag, used in payloads and persistence.
    pub fn card(&self) -> ContactCard {
        ContactCard {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
/// Persisted contact snapshot; the opt-in flag is never stored.
pub struct ContactCard {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<ContactCard> for ContactInfo {
    /// Restoring a remembered card keeps the opt-in switched on.
    fn from(card: ContactCard) -> Self {
        Self {
            full_name: card.full_name,
            email: card.email,
            phone: card.phone,
            address: card.address,
            save_info: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactInfo {
        ContactInfo {
            full_name: "Ana Rivera".into(),
            email: "ana@example.com".into(),
            phone: "787-555-0101".into(),
            address: "12 Calle Sol, San Juan".into(),
            save_info: false,
        }
    }

    #[test]
    fn complete_requires_every_field() {
        let contact = filled();
        assert!(contact.is_complete());

        let mut missing = filled();
        missing.phone = "   ".into();
        assert!(!missing.is_complete());
    }

    #[test]
    fn restored_card_enables_save_flag() {
        let restored: ContactInfo = filled().card().into();
        assert!(restored.save_info);
        assert_eq!(restored.full_name, "Ana Rivera");
    }
}

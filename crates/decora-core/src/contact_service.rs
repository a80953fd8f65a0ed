use std::sync::Arc;

use tracing::warn;

use decora_domain::ContactCard;

use crate::storage::{keys, KeyValueStore};
use crate::Result;

/// Remembers the contact card between bookings when the shopper opts in.
#[derive(Clone)]
pub struct SavedContactService {
    store: Arc<dyn KeyValueStore>,
}

impl SavedContactService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the remembered card, if any. A card that can no longer be
    /// read or parsed is treated as absent; pre-filling is best-effort.
    pub fn load(&self) -> Option<ContactCard> {
        let raw = match self.store.get(keys::SAVED_CONTACT) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("unable to read remembered contact: {}", err);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(card) => Some(card),
            Err(err) => {
                warn!("discarding corrupt remembered contact: {}", err);
                None
            }
        }
    }

    pub fn save(&self, card: &ContactCard) -> Result<()> {
        crate::storage::write_json(self.store.as_ref(), keys::SAVED_CONTACT, card)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(keys::SAVED_CONTACT)
    }
}

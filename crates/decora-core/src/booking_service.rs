use std::sync::Arc;

use decora_domain::BookingPayload;

use crate::storage::{keys, read_strict, write_json, KeyValueStore};
use crate::Result;

/// Append-only log of submitted bookings. This list is the source of truth
/// for "booking accepted", so unlike the convenience stores it never
/// discards a document it cannot parse; errors surface to the caller.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn KeyValueStore>,
}

impl BookingService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read-modify-write append. Single-writer by construction; the host
    /// runs one wizard at a time.
    pub fn append(&self, payload: &BookingPayload) -> Result<()> {
        let mut bookings: Vec<BookingPayload> =
            read_strict(self.store.as_ref(), keys::SERVICE_REQUESTS)?;
        bookings.push(payload.clone());
        write_json(self.store.as_ref(), keys::SERVICE_REQUESTS, &bookings)
    }

    pub fn list(&self) -> Result<Vec<BookingPayload>> {
        read_strict(self.store.as_ref(), keys::SERVICE_REQUESTS)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

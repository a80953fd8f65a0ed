//! Single entry point hosts wire once and hand around.

use std::sync::Arc;

use decora_catalog::Catalog;
use decora_domain::ServiceKind;

use crate::{
    booking_service::BookingService,
    cart_service::CartService,
    contact_service::SavedContactService,
    notify::{NotificationDispatcher, NullDispatcher},
    product_service::ProductService,
    storage::{KeyValueStore, MemoryStore},
    time::{Clock, SystemClock},
    vendor_service::VendorService,
    wishlist_service::WishlistService,
    wizard::BookingWizard,
    Result,
};

/// Owns the catalog and the shared collaborators, and hands out the typed
/// services plus booking wizards. Everything it returns shares the same
/// underlying store, so the cart a host reads is the cart it wrote.
pub struct Storefront {
    catalog: Catalog,
    store: Arc<dyn KeyValueStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    clock: Arc<dyn Clock>,
}

impl Storefront {
    /// Wires a storefront from explicit collaborators. The catalog is
    /// validated up front so wizards can lean on its invariants.
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            store,
            dispatcher,
            clock,
        })
    }

    /// Built-in catalog, in-memory storage, no notification channel.
    /// What demos and tests want.
    pub fn with_defaults() -> Self {
        Self {
            catalog: Catalog::default(),
            store: Arc::new(MemoryStore::new()),
            dispatcher: Arc::new(NullDispatcher),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn begin_booking(&self, kind: ServiceKind) -> Result<BookingWizard> {
        BookingWizard::new(
            &self.catalog,
            kind,
            self.store.clone(),
            self.dispatcher.clone(),
            self.clock.clone(),
        )
    }

    pub fn bookings(&self) -> BookingService {
        BookingService::new(self.store.clone())
    }

    pub fn saved_contact(&self) -> SavedContactService {
        SavedContactService::new(self.store.clone())
    }

    pub fn cart(&self) -> CartService {
        CartService::new(self.store.clone())
    }

    pub fn wishlist(&self) -> WishlistService {
        WishlistService::new(self.store.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.store.clone(), self.clock.clone())
    }

    pub fn vendors(&self) -> VendorService {
        VendorService::new(self.store.clone(), self.clock.clone())
    }
}

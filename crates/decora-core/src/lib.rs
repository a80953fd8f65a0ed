//! decora-core
//!
//! Business logic and services for the Decora storefront: the booking
//! wizard engine, pricing, the durable booking log, cart/wishlist/product
//! shelves, and the collaborator traits (storage, clock, notifications).
//! Depends on decora-domain and decora-catalog. No UI, no terminal I/O,
//! no direct filesystem access.

pub mod booking_service;
pub mod cart_service;
pub mod contact_service;
pub mod error;
pub mod notify;
pub mod product_service;
pub mod reference;
pub mod storage;
pub mod storefront;
pub mod time;
pub mod vendor_service;
pub mod wishlist_service;
pub mod wizard;

pub use booking_service::BookingService;
pub use cart_service::CartService;
pub use contact_service::SavedContactService;
pub use error::{CoreError, Result};
pub use notify::{DispatchReport, NotificationDispatcher, NullDispatcher};
pub use product_service::{ProductService, HOUSE_VENDOR};
pub use storage::{KeyValueStore, MemoryStore};
pub use storefront::Storefront;
pub use time::{Clock, FixedClock, SystemClock};
pub use vendor_service::VendorService;
pub use wishlist_service::WishlistService;
pub use wizard::{BookingWizard, StepBack, Submission};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("decora_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

//! decora-catalog
//!
//! Merchandising data for the booking wizard: bookable areas, style and
//! budget option lists, and per-service profiles (step order, surcharge
//! schedule, reference prefix). Ships sensible built-ins and persists
//! overrides as a single JSON document.

pub mod error;
pub mod manager;
pub mod model;

pub use error::CatalogError;
pub use manager::CatalogManager;
pub use model::{Catalog, ServiceProfile, SurchargeSchedule};

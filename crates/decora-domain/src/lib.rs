//! decora-domain
//!
//! Pure domain models for the Decora storefront (areas, space entries,
//! contacts, booking payloads, products, cart lines).
//! No I/O, no storage. Only data types and core enums.

pub mod area;
pub mod cart;
pub mod common;
pub mod contact;
pub mod entry;
pub mod payload;
pub mod product;
pub mod service;

pub use area::*;
pub use cart::*;
pub use common::*;
pub use contact::*;
pub use entry::*;
pub use payload::*;
pub use product::*;
pub use service::*;

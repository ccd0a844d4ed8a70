//! Domain models
//!
//! Plain serde structs stored by the engine's collections. Records carry
//! their natural keys (SKU code, outlet code, category + SKU) instead of a
//! database id; lookups and replacements always go through filters.

pub mod msl_item;
pub mod outlet;
pub mod product;
pub mod visit;

// Re-exports
pub use msl_item::MslItem;
pub use outlet::Outlet;
pub use product::Product;
pub use visit::{Visit, VisitOrder};

//! Shared types for the Kanvas field-sales platform
//!
//! Common types used across multiple crates: domain models (MSL items,
//! catalog products, outlets, visits) and the unified error types.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{MslItem, Outlet, Product, Visit, VisitOrder};
pub use serde::{Deserialize, Serialize};

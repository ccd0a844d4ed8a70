//! Unified error handling for the Kanvas platform
//!
//! - [`ErrorCode`]: numeric error codes shared with frontends
//! - [`AppError`]: structured error with code, message and optional details

pub mod codes;
pub mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};

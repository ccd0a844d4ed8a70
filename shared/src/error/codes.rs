//! Unified error codes for the Kanvas platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Import / CSV errors
//! - 2xxx: Catalog errors
//! - 3xxx: Outlet errors
//! - 4xxx: Visit errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Import / CSV ====================
    /// Uploaded file is empty (no header or no data rows)
    ImportEmptyFile = 1001,
    /// Required columns are missing from the header
    ImportSchemaMismatch = 1002,
    /// Too many rows in a single upload
    ImportTooManyRows = 1003,
    /// Commit was rejected (no valid rows)
    ImportNothingToCommit = 1004,

    // ==================== 2xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 2001,
    /// Product has invalid price
    ProductInvalidPrice = 2002,
    /// MSL item not found
    MslItemNotFound = 2101,
    /// MSL category has no items
    MslCategoryEmpty = 2102,

    // ==================== 3xxx: Outlet ====================
    /// Outlet not found
    OutletNotFound = 3001,
    /// Outlet code already exists
    OutletCodeExists = 3002,

    // ==================== 4xxx: Visit ====================
    /// Visit not found
    VisitNotFound = 4001,
    /// Visit has an invalid order line
    VisitInvalidOrderLine = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Import
            ErrorCode::ImportEmptyFile => "Uploaded file has no data rows",
            ErrorCode::ImportSchemaMismatch => "Required columns are missing",
            ErrorCode::ImportTooManyRows => "Too many rows in a single upload",
            ErrorCode::ImportNothingToCommit => "No valid rows to commit",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has an invalid price",
            ErrorCode::MslItemNotFound => "MSL item not found",
            ErrorCode::MslCategoryEmpty => "MSL category has no items",

            // Outlet
            ErrorCode::OutletNotFound => "Outlet not found",
            ErrorCode::OutletCodeExists => "Outlet code already exists",

            // Visit
            ErrorCode::VisitNotFound => "Visit not found",
            ErrorCode::VisitInvalidOrderLine => "Visit has an invalid order line",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            1001 => Ok(ErrorCode::ImportEmptyFile),
            1002 => Ok(ErrorCode::ImportSchemaMismatch),
            1003 => Ok(ErrorCode::ImportTooManyRows),
            1004 => Ok(ErrorCode::ImportNothingToCommit),
            2001 => Ok(ErrorCode::ProductNotFound),
            2002 => Ok(ErrorCode::ProductInvalidPrice),
            2101 => Ok(ErrorCode::MslItemNotFound),
            2102 => Ok(ErrorCode::MslCategoryEmpty),
            3001 => Ok(ErrorCode::OutletNotFound),
            3002 => Ok(ErrorCode::OutletCodeExists),
            4001 => Ok(ErrorCode::VisitNotFound),
            4002 => Ok(ErrorCode::VisitInvalidOrderLine),
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            _ => Err(format!("Unknown error code: {}", value)),
        }
    }
}

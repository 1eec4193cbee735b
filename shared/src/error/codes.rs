//! Unified error codes for the reservation workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Booking errors
//! - 7xxx: Catalog errors (restaurant / table / service)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
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

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Requested tables are already booked in the conflict window
    BookingConflict = 4002,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4003,
    /// Guest count outside the allowed range
    GuestCountOutOfRange = 4004,
    /// Note exceeds maximum length
    NoteTooLong = 4006,
    /// Deposit amount is invalid
    InvalidDeposit = 4007,
    /// Selected tables cannot seat the party
    InsufficientCapacity = 4008,

    // ==================== 7xxx: Catalog ====================
    /// Restaurant not found
    RestaurantNotFound = 7001,
    /// Table not found
    TableNotFound = 7002,
    /// Service not found
    ServiceNotFound = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
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

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::BookingConflict => "Selected tables are already booked at this time",
            ErrorCode::InvalidStatusTransition => "Booking status cannot be changed this way",
            ErrorCode::GuestCountOutOfRange => "Guest count is out of range",
            ErrorCode::NoteTooLong => "Note is too long",
            ErrorCode::InvalidDeposit => "Deposit amount is invalid",
            ErrorCode::InsufficientCapacity => "Selected tables cannot seat all guests",

            // Catalog
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::ServiceNotFound => "Service not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::BookingConflict),
            4003 => Ok(ErrorCode::InvalidStatusTransition),
            4004 => Ok(ErrorCode::GuestCountOutOfRange),
            4006 => Ok(ErrorCode::NoteTooLong),
            4007 => Ok(ErrorCode::InvalidDeposit),
            4008 => Ok(ErrorCode::InsufficientCapacity),

            // Catalog
            7001 => Ok(ErrorCode::RestaurantNotFound),
            7002 => Ok(ErrorCode::TableNotFound),
            7003 => Ok(ErrorCode::ServiceNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

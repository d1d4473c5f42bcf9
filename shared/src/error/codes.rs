//! Error codes for the SmartAgro marketplace
//!
//! Grouped by leading digit:
//! - 0xxx: request shape
//! - 1xxx: authentication and sessions
//! - 4xxx: orders
//! - 6xxx: products and pricing
//! - 9xxx: system

use serde::Serialize;
use std::fmt;

/// Error code sent to clients as a plain number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    /// Required field missing or blank
    RequiredField = 7,

    /// No session cookie
    NotAuthenticated = 1001,
    /// Unknown email or wrong password
    InvalidCredentials = 1002,
    /// Session token not (or no longer) known
    SessionExpired = 1005,
    /// Email is already registered
    UserAlreadyExists = 1010,

    /// Quantity is zero or its total cannot be priced
    OrderInvalidQuantity = 4002,

    ProductNotFound = 6001,
    /// MASP negative, non-finite or too large to price
    ProductInvalidPrice = 6002,
    /// Requested quantity exceeds available stock
    InsufficientStock = 6003,

    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default English message, used when no custom message is given
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::SessionExpired => "Session has expired",
            ErrorCode::UserAlreadyExists => "User already exists",
            ErrorCode::OrderInvalidQuantity => "Order quantity must be at least 1",
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::InsufficientStock => "Not enough stock",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

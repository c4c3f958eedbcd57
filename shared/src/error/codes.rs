//! Unified error codes for the storefront
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
//! - 8xxx: User errors
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
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Password reset token is invalid
    ResetTokenInvalid = 1008,
    /// Password reset token has expired
    ResetTokenExpired = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,
    /// Admin cannot delete their own account
    CannotDeleteSelf = 2005,
    /// Caller does not own the requested resource
    NotResourceOwner = 2006,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4007,
    /// Order status value is not one of the defined statuses
    OrderInvalidStatus = 4008,
    /// Order total must be greater than zero
    OrderInvalidTotal = 4009,
    /// Shipping address is missing a required field
    ShippingAddressIncomplete = 4010,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email is already registered
    EmailExists = 8002,
    /// Role value is not one of user/supplier/admin
    InvalidRole = 8003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Upstream collaborator (payment, mail) failure
    UpstreamError = 9004,
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        use ErrorCode::*;
        let code = match value {
            0 => Success,
            1 => Unknown,
            2 => ValidationFailed,
            3 => NotFound,
            4 => AlreadyExists,
            5 => InvalidRequest,
            7 => RequiredField,
            1001 => NotAuthenticated,
            1002 => InvalidCredentials,
            1003 => TokenExpired,
            1004 => TokenInvalid,
            1007 => AccountDisabled,
            1008 => ResetTokenInvalid,
            1009 => ResetTokenExpired,
            2001 => PermissionDenied,
            2003 => AdminRequired,
            2005 => CannotDeleteSelf,
            2006 => NotResourceOwner,
            4001 => OrderNotFound,
            4007 => OrderEmpty,
            4008 => OrderInvalidStatus,
            4009 => OrderInvalidTotal,
            4010 => ShippingAddressIncomplete,
            5001 => PaymentFailed,
            5003 => PaymentInvalidMethod,
            6001 => ProductNotFound,
            6002 => ProductInvalidPrice,
            6003 => ProductOutOfStock,
            8001 => UserNotFound,
            8002 => EmailExists,
            8003 => InvalidRole,
            9001 => InternalError,
            9002 => DatabaseError,
            9003 => ConfigError,
            9004 => UpstreamError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this code
    pub fn message(&self) -> &'static str {
        use ErrorCode::*;
        match self {
            Success => "Success",
            Unknown => "Unknown error",
            ValidationFailed => "Validation failed",
            NotFound => "Resource not found",
            AlreadyExists => "Resource already exists",
            InvalidRequest => "Invalid request",
            RequiredField => "Required field missing",
            NotAuthenticated => "Authentication required",
            InvalidCredentials => "Invalid email or password",
            TokenExpired => "Token expired",
            TokenInvalid => "Invalid token",
            AccountDisabled => "Account has been disabled",
            ResetTokenInvalid => "Invalid password reset token",
            ResetTokenExpired => "Password reset token has expired",
            PermissionDenied => "Permission denied",
            AdminRequired => "Admin access required",
            CannotDeleteSelf => "Admins cannot delete their own account",
            NotResourceOwner => "You do not have access to this resource",
            OrderNotFound => "Order not found",
            OrderEmpty => "Order items are required",
            OrderInvalidStatus => "Valid order status is required",
            OrderInvalidTotal => "Valid total amount is required",
            ShippingAddressIncomplete => "Shipping address is incomplete",
            PaymentFailed => "Payment processing failed",
            PaymentInvalidMethod => "Invalid payment method",
            ProductNotFound => "Product not found",
            ProductInvalidPrice => "Product price is invalid",
            ProductOutOfStock => "Product is out of stock",
            UserNotFound => "User not found",
            EmailExists => "User with this email already exists",
            InvalidRole => "Invalid role. Must be 'user', 'admin', or 'supplier'",
            InternalError => "Internal server error",
            DatabaseError => "Database error",
            ConfigError => "Configuration error",
            UpstreamError => "Upstream service failure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::AdminRequired,
            ErrorCode::OrderNotFound,
            ErrorCode::PaymentFailed,
            ErrorCode::ProductNotFound,
            ErrorCode::EmailExists,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::OrderNotFound.to_string(), "E4001");
    }
}

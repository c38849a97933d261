//! Unified error codes for the marketplace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Wallet errors
//! - 6xxx: Catalog errors
//! - 7xxx: Vendor errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so clients can branch on a stable number
/// instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
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
    /// Status value is not recognized
    InvalidStatus = 9,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 10,
    /// Row changed between read and write
    ConcurrentModification = 11,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no line items
    OrderEmpty = 4002,
    /// Requested quantity exceeds stock
    InsufficientStock = 4003,
    /// Order total could not be computed
    OrderTotalInvalid = 4004,
    /// Vendor does not own the order
    OrderVendorMismatch = 4005,

    // ==================== 5xxx: Wallet ====================
    /// Amount is not a positive finite number
    InvalidAmount = 5001,
    /// Withdrawal exceeds wallet balance
    InsufficientBalance = 5002,
    /// Withdrawal request not found
    WithdrawalNotFound = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product has invalid stock count
    ProductInvalidStock = 6003,
    /// SKU already used by another product
    SkuExists = 6004,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has products
    CategoryHasProducts = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,
    /// Subcategory not found
    SubcategoryNotFound = 6201,
    /// Subcategory name already exists
    SubcategoryNameExists = 6202,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// No file provided in request
    NoFileProvided = 6504,
    /// Empty file provided
    EmptyFile = 6505,
    /// Invalid file extension
    InvalidFileExtension = 6507,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 7xxx: Vendor ====================
    /// Vendor not found
    VendorNotFound = 7001,
    /// Email already registered
    VendorEmailExists = 7002,
    /// Bank account already registered
    VendorAccountExists = 7003,
    /// Password and confirmation differ
    PasswordMismatch = 7004,
    /// Account number and confirmation differ
    AccountNumberMismatch = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "All fields are required",
            ErrorCode::InvalidStatus => "Invalid status",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",
            ErrorCode::ConcurrentModification => "Resource was modified concurrently",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "At least one product is required",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::OrderTotalInvalid => "Invalid total amount calculation",
            ErrorCode::OrderVendorMismatch => "Vendor does not match the order",

            // Wallet
            ErrorCode::InvalidAmount => "Invalid withdrawal amount",
            ErrorCode::InsufficientBalance => "Insufficient wallet balance",
            ErrorCode::WithdrawalNotFound => "Withdrawal request not found",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Price must be a valid non-negative number",
            ErrorCode::ProductInvalidStock => "Stocks must be a valid non-negative integer",
            ErrorCode::SkuExists => "SKU already exists",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category has products",
            ErrorCode::CategoryNameExists => "Category already exists",
            ErrorCode::SubcategoryNotFound => "Subcategory not found",
            ErrorCode::SubcategoryNameExists => "Subcategory already exists",

            // File upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::InvalidFileExtension => "Invalid file extension",
            ErrorCode::FileStorageFailed => "File storage failed",

            // Vendor
            ErrorCode::VendorNotFound => "Vendor not found",
            ErrorCode::VendorEmailExists => "Email is already registered",
            ErrorCode::VendorAccountExists => "Account number is already registered",
            ErrorCode::PasswordMismatch => "Passwords do not match",
            ErrorCode::AccountNumberMismatch => "Account numbers do not match",

            // System
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
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::InvalidStatus),
            10 => Ok(ErrorCode::InvalidStatusTransition),
            11 => Ok(ErrorCode::ConcurrentModification),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::InsufficientStock),
            4004 => Ok(ErrorCode::OrderTotalInvalid),
            4005 => Ok(ErrorCode::OrderVendorMismatch),

            5001 => Ok(ErrorCode::InvalidAmount),
            5002 => Ok(ErrorCode::InsufficientBalance),
            5003 => Ok(ErrorCode::WithdrawalNotFound),

            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductInvalidStock),
            6004 => Ok(ErrorCode::SkuExists),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),
            6103 => Ok(ErrorCode::CategoryNameExists),
            6201 => Ok(ErrorCode::SubcategoryNotFound),
            6202 => Ok(ErrorCode::SubcategoryNameExists),

            6501 => Ok(ErrorCode::FileTooLarge),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6507 => Ok(ErrorCode::InvalidFileExtension),
            6509 => Ok(ErrorCode::FileStorageFailed),

            7001 => Ok(ErrorCode::VendorNotFound),
            7002 => Ok(ErrorCode::VendorEmailExists),
            7003 => Ok(ErrorCode::VendorAccountExists),
            7004 => Ok(ErrorCode::PasswordMismatch),
            7005 => Ok(ErrorCode::AccountNumberMismatch),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

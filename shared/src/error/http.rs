//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::WithdrawalNotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::SubcategoryNotFound
            | Self::VendorNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::InvalidStatusTransition
            | Self::ConcurrentModification
            | Self::SkuExists
            | Self::CategoryHasProducts
            | Self::CategoryNameExists
            | Self::SubcategoryNameExists
            | Self::VendorEmailExists
            | Self::VendorAccountExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::FileStorageFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and domain preconditions)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

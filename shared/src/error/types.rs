//! Error types and the response envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with a structured error code
///
/// The only error type handlers return. System errors (9xxx) keep their
/// detail for logging; clients only see the code's default message.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn is_system(&self) -> bool {
        self.code.category() == ErrorCategory::System
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> &str {
        if self.is_system() {
            self.code.message()
        } else {
            &self.message
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a "required fields" error
    pub fn required(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RequiredField, msg)
    }

    /// Create a not found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Uniform response envelope
///
/// Success: `{"success": true, "message": "...", "data": ...}`
/// Failure: `{"success": false, "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self::success_with_message("OK", data)
    }

    /// Create a success response with custom message and data
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Create a failure envelope from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            success: false,
            message: err.public_message().to_string(),
            data: None,
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if self.is_system() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, rejection.body_text())
    }
}

#[cfg(feature = "db")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::new(ErrorCode::NotFound),
            other => Self::database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::InsufficientStock);
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock");
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::not_found("Vendor");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Vendor not found");

        assert_eq!(AppError::validation("x").code, ErrorCode::ValidationFailed);
        assert_eq!(AppError::required("x").code, ErrorCode::RequiredField);
        assert_eq!(AppError::database("x").code, ErrorCode::DatabaseError);
        assert_eq!(
            AppError::unauthorized().http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_system_error_hides_detail() {
        let err = AppError::database("UNIQUE constraint failed: vendor.email");
        assert!(err.is_system());
        assert_eq!(err.public_message(), "Database error");

        let response = ApiResponse::<()>::error(&err);
        assert!(!response.success);
        assert_eq!(response.message, "Database error");
    }

    #[test]
    fn test_domain_error_keeps_message() {
        let err = AppError::with_message(ErrorCode::ProductNotFound, "Product with ID 7 not found");
        assert_eq!(err.public_message(), "Product with ID 7 not found");
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success_with_message("Created", 42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Created");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_failure_envelope_has_no_data() {
        let err = AppError::new(ErrorCode::VendorNotFound);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Vendor not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Order ORD-1 not found");
        assert_eq!(format!("{}", err), "Order ORD-1 not found");
    }
}

//! Shared types for the marketplace
//!
//! Error taxonomy, response envelope, domain models and small utilities
//! used by the server and by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};

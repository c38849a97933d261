//! Request extractors whose rejections use the API error envelope

use axum::extract::{FromRequest, FromRequestParts};
use shared::AppError;

/// JSON body; a malformed body becomes a `400` [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string; parse failures become a `400` [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `?id=` query used by the single-entity endpoints
#[derive(Debug, serde::Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

impl IdQuery {
    pub fn require(&self) -> Result<i64, AppError> {
        self.id.ok_or_else(|| AppError::required("id query parameter is required"))
    }
}

//! HTTP API
//!
//! All business routes live under `/api/v1`; every response uses the
//! `{success, message, data}` envelope.
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`upload`] - file upload and download
//! - [`vendors`] - registration, login, wallet and withdrawals
//! - [`products`] - product catalog
//! - [`categories`] - categories
//! - [`subcategories`] - subcategories
//! - [`orders`] - order placement and status

pub mod extract;

pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod subcategories;
pub mod upload;
pub mod vendors;

use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use extract::{ApiJson, ApiQuery, IdQuery};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headroom above the upload limit for multipart boundaries and headers
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Request ID generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// HTTP access log
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        request_id = %request_id,
        "{} {} {}",
        method,
        uri,
        response.status()
    );

    response
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .merge(vendors::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(subcategories::router())
        .merge(orders::router())
}

/// Build the fully configured application
///
/// Used by the HTTP server and by integration tests.
pub fn build_app(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        .with_state(state)
        // Body limit - sized for file uploads
        .layer(DefaultBodyLimit::max(body_limit))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request timeout - 408 once exceeded
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        // Access log (sees the request id set below)
        .layer(middleware::from_fn(log_request))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        // Request ID - outermost, runs first
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
}

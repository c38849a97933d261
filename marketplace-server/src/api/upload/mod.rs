//! Upload Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/v1/upload | POST | multipart `file` field, returns `{url}` |
//! | /uploads/{name} | GET | stored file |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/v1/upload", post(handler::upload))
        .route("/uploads/{name}", get(handler::serve))
}

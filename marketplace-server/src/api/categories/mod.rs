//! Category API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/v1/category/create | POST |
//! | /api/v1/category/update | PATCH |
//! | /api/v1/category/delete?id= | DELETE |
//! | /api/v1/category/all | GET |

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/v1/category", category_routes())
}

fn category_routes() -> Router<ServerState> {
    Router::new()
        .route("/create", post(handler::create))
        .route("/update", patch(handler::update))
        .route("/delete", delete(handler::delete))
        .route("/all", get(handler::list))
}

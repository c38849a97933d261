//! Subcategory API

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/v1/subcategory",
        Router::new()
            .route("/create", post(handler::create))
            .route("/all", get(handler::list))
            .route("/delete", delete(handler::delete)),
    )
}

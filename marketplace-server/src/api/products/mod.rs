//! Product API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/product/add | POST | vendor bearer |
//! | /api/v1/product/products | GET | |
//! | /api/v1/product/product?id= | GET | |
//! | /api/v1/product/searchproduct | GET | |
//! | /api/v1/product/update | PATCH | |
//! | /api/v1/product/delete?id= | DELETE | |
//! | /api/v1/product/approve?id= | PATCH | |

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/v1/product", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/add", post(handler::create))
        .route("/products", get(handler::list))
        .route("/product", get(handler::get_by_id))
        .route("/searchproduct", get(handler::search))
        .route("/update", patch(handler::update))
        .route("/delete", delete(handler::delete))
        .route("/approve", patch(handler::approve))
}

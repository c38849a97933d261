//! Order API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/v1/order/add | POST |
//! | /api/v1/order/updateorder | PATCH |
//! | /api/v1/order/allorder | GET |
//! | /api/v1/order/singleorder/{id} | GET |
//! | /api/v1/order/total-payments | GET |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/v1/order", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/add", post(handler::place))
        .route("/updateorder", patch(handler::update_status))
        .route("/allorder", get(handler::list))
        .route("/singleorder/{id}", get(handler::get_one))
        .route("/total-payments", get(handler::total_payments))
}

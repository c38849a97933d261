//! Vendor API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/vendor/register | POST | |
//! | /api/v1/vendor/login | POST | |
//! | /api/v1/vendor/logout | POST | vendor bearer |
//! | /api/v1/vendor, /api/v1/vendor/ | GET | |
//! | /api/v1/vendor/vendor?id= | GET | |
//! | /api/v1/vendor/wallet | GET | vendor bearer |
//! | /api/v1/vendor/withdrawl | POST | vendor bearer |
//! | /api/v1/vendor/aprovewithdrwal | POST | |
//! | /api/v1/vendor/withdrawlall | GET | |
//! | /api/v1/vendor/addpayments | POST | |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        // a nested "/" only matches the bare prefix
        .route("/api/v1/vendor/", get(handler::list))
        .nest("/api/v1/vendor", vendor_routes())
}

fn vendor_routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/", get(handler::list))
        .route("/vendor", get(handler::get_by_id))
        .route("/wallet", get(handler::wallet))
        .route("/withdrawl", post(handler::request_withdrawal))
        .route("/aprovewithdrwal", post(handler::update_withdrawal))
        .route("/withdrawlall", get(handler::list_withdrawals))
        .route("/addpayments", post(handler::add_payment))
}

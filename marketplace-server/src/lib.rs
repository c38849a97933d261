//! Marketplace Server - multi-vendor e-commerce backend
//!
//! # Overview
//!
//! - **Catalog** (`services::catalog`): products, categories, subcategories
//! - **Vendors** (`services::vendor_account`): registration, login, wallets
//! - **Orders** (`orders`): cart splitting per vendor, stock decrement,
//!   status workflow
//! - **Wallet** (`wallet`): delivery credits and withdrawal requests
//! - **HTTP API** (`api`): JSON envelope routes under `/api/v1`
//!
//! # Layout
//!
//! ```text
//! marketplace-server/src/
//! ├── core/          # config, state, server loop
//! ├── auth/          # JWT, password hashing, extractor
//! ├── services/      # catalog, vendor accounts, object storage
//! ├── api/           # HTTP routes and handlers
//! ├── utils/         # logging, input validation
//! ├── db/            # SQLite pool and repositories
//! ├── orders/        # order placement and status
//! └── wallet.rs      # vendor wallet ledger
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;
pub mod wallet;

pub use auth::{CurrentVendor, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = $value)*
        );
    };
}

/// Load `.env` and install the global logger
///
/// Reads `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR` directly since the logger
/// must be up before [`Config::from_env`] reports anything.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(format!("Failed to load .env: {e}").into());
    }

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON").ok().map(|v| v == "true" || v == "1");
    let dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    init_logger_with_file(level.as_deref(), json, dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  __  __           _        _         _
 |  \/  | __ _ _ _| |_____ | |_ _ __ | |__ _ __ ___
 | |\/| |/ _` | '_| / / -_)|  _| '_ \| / _` / _/ -_)
 |_|  |_|\__,_|_| |_\_\___| \__| .__/|_\__,_\__\___|
                               |_|
    "#
    );
}

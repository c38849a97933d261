//! Data models
//!
//! Shared between the server and API clients. JSON bodies are camelCase.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod order;
pub mod product;
pub mod vendor;
pub mod wallet;

// Re-exports
pub use category::*;
pub use order::*;
pub use product::*;
pub use vendor::*;
pub use wallet::*;

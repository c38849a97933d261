//! Authentication
//!
//! - [`JwtService`] - bearer token issue/validation
//! - [`CurrentVendor`] - extractor for vendor-only handlers
//! - [`password`] - argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod password;

pub use extractor::CurrentVendor;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};

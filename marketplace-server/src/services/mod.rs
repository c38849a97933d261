//! Service layer
//!
//! - [`catalog`] - product, category and subcategory rules
//! - [`vendor_account`] - registration, login, logout
//! - [`storage`] - uploaded file storage

pub mod catalog;
pub mod storage;
pub mod vendor_account;

pub use storage::{LocalObjectStorage, ObjectStorage, StorageError};

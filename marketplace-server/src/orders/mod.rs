//! Orders
//!
//! - **placement**: splits a cart into one order per vendor, then commits
//!   stock order by order, deleting the order whose stock could not be taken
//! - **status**: transition-checked status updates, crediting the vendor
//!   wallet on delivery
//! - **money**: decimal totals
//!
//! # Placement flow
//!
//! ```text
//! cart ─► validate + group by vendor ─► stage Pending orders
//!                                            │
//!                        per order: tx { decrement stock for each line }
//!                                            │
//!                     failure ─► rollback, delete this and later orders
//! ```

pub mod money;
pub mod placement;
pub mod status;

pub use placement::place_order;
pub use status::update_order_status;

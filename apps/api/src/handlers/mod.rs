//! # HTTP Handlers
//!
//! One module per resource. Handlers validate with `meeple_core`, ask the
//! store through `meeple_db` repositories, and let `?` turn every failure
//! into an [`ApiError`](crate::error::ApiError).

pub mod categories;
pub mod customers;
pub mod games;
pub mod health;
pub mod rentals;

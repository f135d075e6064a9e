//! TrackSmart Core - Domain entities, services, and traits.
//!
//! This crate contains the campus spending logic: profiles, the purchase log,
//! the daily cafeteria coupon, checkout, and spending insights.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod checkout;
pub mod constants;
pub mod coupons;
pub mod errors;
pub mod insights;
pub mod profiles;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

//! SQLite storage implementation for daily coupon ledgers.

mod model;
mod repository;

pub use model::CouponLedgerDB;
pub use repository::CouponLedgerRepository;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by coupon ledger operations.
///
/// Missing, expired and exhausted ledgers are ordinary states and never
/// surface here.
#[derive(Debug, Error)]
pub enum CouponError {
    #[error(
        "Coupon ledger for user {user_id} on {date} kept changing; gave up after {attempts} attempts"
    )]
    Contention {
        user_id: String,
        date: NaiveDate,
        attempts: usize,
    },
    #[error("Coupon store is unavailable: {0}")]
    StoreUnavailable(String),
}

//! Daily coupon ledger models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storage key of a coupon ledger: one record per user per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CouponKey {
    pub user_id: String,
    pub date: NaiveDate,
}

impl CouponKey {
    pub fn new(user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            date,
        }
    }
}

/// A user's cafeteria coupon for one calendar day.
///
/// Serialized as `{initialValue, value, isValid, date: "YYYY-MM-DD"}`.
/// `value` stays within `[0, initial_value]` and never increases during the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponLedger {
    pub initial_value: Decimal,
    /// Remaining value
    pub value: Decimal,
    pub is_valid: bool,
    pub date: NaiveDate,
}

impl CouponLedger {
    /// True when the ledger belongs to `today`.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// True when the ledger can still discount a purchase.
    pub fn is_usable(&self) -> bool {
        self.is_valid && self.value > Decimal::ZERO
    }
}

/// Outcome of applying the coupon to one purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawDown {
    /// Ledger after the deduction; unchanged (or absent) on a no-op
    pub ledger: Option<CouponLedger>,
    /// Amount still to be paid after the discount
    pub amount_owed: Decimal,
    /// Amount covered by the coupon
    pub deducted: Decimal,
}

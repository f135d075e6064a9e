//! Coupon store and service traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::coupons_model::{CouponKey, CouponLedger, DrawDown};
use crate::errors::Result;
use crate::profiles::MealPlan;

/// Key-value store holding one coupon ledger per user per day.
#[async_trait]
pub trait CouponStoreTrait: Send + Sync {
    /// Reads the ledger stored under `key`.
    fn get(&self, key: &CouponKey) -> Result<Option<CouponLedger>>;

    /// Unconditionally stores `ledger` under `key`.
    async fn put(&self, key: &CouponKey, ledger: CouponLedger) -> Result<()>;

    /// Stores `replacement` only if the current value equals `expected`
    /// (`None` meaning no record). Returns whether the swap happened.
    ///
    /// Implementations must make the comparison and the write one atomic step.
    async fn compare_and_swap(
        &self,
        key: &CouponKey,
        expected: Option<&CouponLedger>,
        replacement: CouponLedger,
    ) -> Result<bool>;
}

/// Trait defining the contract for daily coupon operations.
#[async_trait]
pub trait CouponServiceTrait: Send + Sync {
    /// Returns today's ledger, issuing it on first use.
    ///
    /// `None` when the meal plan carries no coupon.
    async fn get_or_create_today_coupon(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        today: NaiveDate,
    ) -> Result<Option<CouponLedger>>;

    /// Reads today's ledger without issuing one.
    fn get_today_coupon(&self, user_id: &str, today: NaiveDate) -> Result<Option<CouponLedger>>;

    /// Applies today's coupon to one purchase.
    ///
    /// Must be called exactly once per eligible purchase; repeated calls
    /// spend the coupon again.
    async fn draw_down(
        &self,
        user_id: &str,
        today: NaiveDate,
        purchase_amount: Decimal,
    ) -> Result<DrawDown>;
}

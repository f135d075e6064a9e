//! Pure coupon ledger arithmetic: daily issue and draw-down.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::coupons_model::{CouponLedger, DrawDown};
use crate::profiles::MealPlan;

/// Issues a fresh ledger for `today`, or `None` when the meal plan carries no coupon.
///
/// Nothing carries over from earlier days.
pub fn issue_coupon(meal_plan: MealPlan, today: NaiveDate) -> Option<CouponLedger> {
    let initial_value = meal_plan.daily_coupon_value()?;
    if initial_value <= Decimal::ZERO {
        return None;
    }
    Some(CouponLedger {
        initial_value,
        value: initial_value,
        is_valid: true,
        date: today,
    })
}

/// Applies the coupon to a purchase of `purchase_amount`.
///
/// A missing, invalid or empty ledger leaves the price untouched. Otherwise
/// the coupon covers as much of the purchase as its remaining value allows.
pub fn draw_down(ledger: Option<&CouponLedger>, purchase_amount: Decimal) -> DrawDown {
    let usable = ledger.filter(|l| l.is_usable());
    let Some(current) = usable else {
        return DrawDown {
            ledger: ledger.cloned(),
            amount_owed: purchase_amount,
            deducted: Decimal::ZERO,
        };
    };

    let deduction = purchase_amount.min(current.value).max(Decimal::ZERO);
    let remaining = current.value - deduction;

    DrawDown {
        ledger: Some(CouponLedger {
            value: remaining,
            is_valid: remaining > Decimal::ZERO,
            ..current.clone()
        }),
        amount_owed: purchase_amount - deduction,
        deducted: deduction,
    }
}

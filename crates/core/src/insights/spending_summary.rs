use std::collections::BTreeMap;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::insights_model::{CategorySpending, GoalProgress, MonthlySpendingSummary};
use crate::profiles::UserProfile;
use crate::transactions::{Transaction, VendorCategory};
use crate::utils::decimal_utils::percent_of;
use crate::utils::time_utils::{previous_month, start_of_month};

const PERCENT_DP: u32 = 2;

/// Percentage rounded for display; zero when `whole` is not positive.
fn rounded_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        percent_of(part, whole).round_dp(PERCENT_DP)
    } else {
        Decimal::ZERO
    }
}

/// Summarizes the calendar month containing `now`, from its 1st through `now`.
pub fn summarize_month(
    profile: &UserProfile,
    transactions: &[Transaction],
    now: DateTime<Tz>,
) -> MonthlySpendingSummary {
    let tz = now.timezone();
    let month_start = start_of_month(&now);
    let (prev_year, prev_month) = previous_month(now.date_naive());

    let mut transaction_count = 0;
    let mut total_spent = Decimal::ZERO;
    let mut coupon_savings = Decimal::ZERO;
    let mut previous_total = Decimal::ZERO;
    let mut by_category: BTreeMap<VendorCategory, Decimal> = BTreeMap::new();

    for tx in transactions {
        let local = tx.date.with_timezone(&tz);
        if local >= month_start && local <= now {
            transaction_count += 1;
            total_spent = total_spent.saturating_add(tx.amount);
            coupon_savings = coupon_savings.saturating_add(tx.coupon_amount);
            let sum = by_category.entry(tx.vendor_category).or_default();
            *sum = sum.saturating_add(tx.amount);
        } else if local.year() == prev_year && local.month() == prev_month {
            previous_total = previous_total.saturating_add(tx.amount);
        }
    }

    let spending_trend = if previous_total > Decimal::ZERO {
        rounded_percent(total_spent.saturating_sub(previous_total), previous_total)
    } else if total_spent > Decimal::ZERO {
        dec!(100)
    } else {
        Decimal::ZERO
    };

    let mut by_category: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            category,
            amount,
            percentage: rounded_percent(amount, total_spent),
        })
        .collect();
    // Stable, so equal amounts keep category order
    by_category.sort_by(|a, b| b.amount.cmp(&a.amount));

    let allowance = profile.monthly_allowance;
    let goal_progress = profile.financial_goal_amount.map(|target| {
        let savings = allowance.saturating_sub(total_spent).max(Decimal::ZERO);
        GoalProgress {
            goal: profile.financial_goal.clone(),
            target_amount: target,
            savings,
            progress: rounded_percent(savings, target).min(dec!(100)),
        }
    });

    MonthlySpendingSummary {
        year: now.year(),
        month: now.month(),
        transaction_count,
        total_spent,
        budget_remaining: allowance.saturating_sub(total_spent),
        budget_utilization: rounded_percent(total_spent, allowance),
        coupon_savings,
        spending_trend,
        by_category,
        goal_progress,
    }
}

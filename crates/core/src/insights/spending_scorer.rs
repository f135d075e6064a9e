use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::insights_model::{SpendingInsight, SpendingStatus};
use crate::constants::BUDGET_DAYS_PER_MONTH;
use crate::profiles::UserProfile;
use crate::transactions::{Transaction, VendorCategory};
use crate::utils::decimal_utils::{percent_of, saturating_div};
use crate::utils::format_utils::format_currency;
use crate::utils::time_utils::start_of_month;

const STARTING_SCORE: i32 = 100;
const GOOD_THRESHOLD: i32 = 80;
const MODERATE_THRESHOLD: i32 = 50;

const HIGH_DAILY_UTILIZATION: Decimal = dec!(80);
const MEDIUM_DAILY_UTILIZATION: Decimal = dec!(50);
const FORECAST_TOLERANCE: Decimal = dec!(1.1);
const PACE_MARGIN: Decimal = dec!(25);
const CONCENTRATION_SHARE: Decimal = dec!(60);
const MAX_DAILY_ORDERS: usize = 5;

pub const NO_TRANSACTIONS_ADVICE: &str =
    "Start making transactions to get personalized spending advice.";

/// Inputs the rules are evaluated against, all relative to one instant.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpendingFeatures {
    pub daily_budget: Decimal,
    pub todays_spending: Decimal,
    pub todays_order_count: usize,
    pub monthly_spending: Decimal,
    pub budget_utilization: Decimal,
    pub top_category: Option<(VendorCategory, Decimal)>,
}

pub(crate) fn extract_features(
    profile: &UserProfile,
    transactions: &[Transaction],
    now: &DateTime<Tz>,
) -> SpendingFeatures {
    let tz = now.timezone();
    let today = now.date_naive();
    let month_start = start_of_month(now);
    let allowance = profile.monthly_allowance;

    let mut todays_spending = Decimal::ZERO;
    let mut todays_order_count = 0;
    let mut monthly_spending = Decimal::ZERO;
    let mut by_category: BTreeMap<VendorCategory, Decimal> = BTreeMap::new();

    for tx in transactions {
        let local = tx.date.with_timezone(&tz);
        if local.date_naive() == today {
            todays_spending = todays_spending.saturating_add(tx.amount);
            todays_order_count += 1;
        }
        if local >= month_start && local <= *now {
            monthly_spending = monthly_spending.saturating_add(tx.amount);
            let sum = by_category.entry(tx.vendor_category).or_default();
            *sum = sum.saturating_add(tx.amount);
        }
    }

    // BTreeMap iterates in declaration order; only a strictly larger sum wins
    let top_category = by_category
        .into_iter()
        .fold(None, |best: Option<(VendorCategory, Decimal)>, (category, amount)| {
            match best {
                Some((_, best_amount)) if best_amount >= amount => best,
                _ => Some((category, amount)),
            }
        });

    let positive_allowance = allowance > Decimal::ZERO;
    SpendingFeatures {
        daily_budget: if positive_allowance {
            allowance / BUDGET_DAYS_PER_MONTH
        } else {
            Decimal::ZERO
        },
        todays_spending,
        todays_order_count,
        monthly_spending,
        budget_utilization: if positive_allowance {
            percent_of(monthly_spending, allowance)
        } else {
            Decimal::ZERO
        },
        top_category,
    }
}

/// Maps a final score onto its status bucket.
pub fn status_for_score(score: i32) -> SpendingStatus {
    if score >= GOOD_THRESHOLD {
        SpendingStatus::Good
    } else if score >= MODERATE_THRESHOLD {
        SpendingStatus::Moderate
    } else {
        SpendingStatus::Poor
    }
}

/// Scores a student's spending and explains the result.
///
/// Starts at 100 and deducts points for each risk rule that fires. `now` is
/// the single reference instant; transaction timestamps are viewed in its
/// timezone when bucketing by day and month. Never fails.
pub fn analyze_spending(
    profile: &UserProfile,
    transactions: &[Transaction],
    now: DateTime<Tz>,
) -> SpendingInsight {
    if transactions.is_empty() {
        return SpendingInsight {
            status: SpendingStatus::Good,
            advice: vec![NO_TRANSACTIONS_ADVICE.to_string()],
        };
    }

    let features = extract_features(profile, transactions, &now);
    let mut score = STARTING_SCORE;
    let mut advice: Vec<String> = Vec::new();
    let mut add_advice = |text: String| {
        if !advice.contains(&text) {
            advice.push(text);
        }
    };

    if features.daily_budget > Decimal::ZERO {
        let daily_utilization = percent_of(features.todays_spending, features.daily_budget);
        if daily_utilization > HIGH_DAILY_UTILIZATION {
            score -= 40;
            add_advice(
                "You are at high risk of exceeding your daily budget. Limit further purchases."
                    .to_string(),
            );
        } else if daily_utilization > MEDIUM_DAILY_UTILIZATION {
            score -= 20;
            add_advice(
                "You are at medium risk of overspending today. Be mindful of your purchases."
                    .to_string(),
            );
        }

        // Hours elapsed including the current one, so midnight divides by 1
        let hours_passed = Decimal::from(now.hour() + 1);
        let forecast = saturating_div(features.todays_spending, hours_passed).saturating_mul(dec!(24));
        if forecast > features.daily_budget.saturating_mul(FORECAST_TOLERANCE) {
            score -= 15;
            add_advice(format!(
                "At your current rate, you may exceed your daily budget by {}.",
                format_currency(forecast.saturating_sub(features.daily_budget))
            ));
        }
    }

    let month_progress = Decimal::from(now.day()) / BUDGET_DAYS_PER_MONTH * dec!(100);
    if features.budget_utilization > month_progress + PACE_MARGIN {
        score -= 25;
        add_advice(
            "You are spending your monthly allowance much faster than expected. Consider setting stricter limits."
                .to_string(),
        );
    }

    if let Some((category, amount)) = features.top_category {
        if features.monthly_spending > Decimal::ZERO
            && percent_of(amount, features.monthly_spending) > CONCENTRATION_SHARE
        {
            score -= 10;
            add_advice(format!(
                "{} purchases are the main contributor to your spending. Review if this can be optimized.",
                category
            ));
        }
    }

    if features.todays_order_count > MAX_DAILY_ORDERS {
        score -= 10;
        add_advice(
            "Multiple small purchases can add up quickly. Try to consolidate your orders."
                .to_string(),
        );
    }

    let status = status_for_score(score);
    if advice.is_empty() {
        advice.push(status.generic_advice().to_string());
    }

    SpendingInsight { status, advice }
}

//! Spending insight and summary models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::VendorCategory;

/// Discretized spending health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpendingStatus {
    Good,
    Moderate,
    Poor,
}

impl SpendingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingStatus::Good => "Good",
            SpendingStatus::Moderate => "Moderate",
            SpendingStatus::Poor => "Poor",
        }
    }

    /// Fallback advice when no rule produced any for this bucket.
    pub(crate) fn generic_advice(&self) -> &'static str {
        match self {
            SpendingStatus::Good => "Your spending is on track. Keep up the good work!",
            SpendingStatus::Moderate => {
                "Your spending is okay, but there is room for improvement."
            }
            SpendingStatus::Poor => {
                "You are at high risk of overspending. It is critical to review your purchases now."
            }
        }
    }
}

/// Scorer output. Never persisted; recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsight {
    pub status: SpendingStatus,
    /// Non-empty, deduplicated, in the order the rules fired
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: VendorCategory,
    pub amount: Decimal,
    /// Share of the month's spending, 0..=100
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal: String,
    pub target_amount: Decimal,
    pub savings: Decimal,
    pub progress: Decimal,
}

/// Totals for the calendar month containing "now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpendingSummary {
    pub year: i32,
    pub month: u32,
    pub transaction_count: usize,
    pub total_spent: Decimal,
    /// May be negative once the allowance is overspent
    pub budget_remaining: Decimal,
    pub budget_utilization: Decimal,
    pub coupon_savings: Decimal,
    /// Percent change against the previous calendar month
    pub spending_trend: Decimal,
    pub by_category: Vec<CategorySpending>,
    pub goal_progress: Option<GoalProgress>,
}

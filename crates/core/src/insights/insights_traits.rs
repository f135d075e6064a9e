//! Insights service trait.

use super::insights_model::{MonthlySpendingSummary, SpendingInsight};
use crate::errors::Result;

/// Read-only analytics over a student's profile and purchase log.
pub trait InsightsServiceTrait: Send + Sync {
    /// Scores the student's spending as of now.
    fn get_spending_insight(&self, user_id: &str) -> Result<SpendingInsight>;

    /// Summarizes the current calendar month.
    fn get_monthly_summary(&self, user_id: &str) -> Result<MonthlySpendingSummary>;
}

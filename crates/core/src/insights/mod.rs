//! Insights module - spending risk scoring and monthly summaries.

mod insights_model;
mod insights_service;
mod insights_traits;
mod spending_scorer;
mod spending_summary;


pub use insights_model::{
    CategorySpending, GoalProgress, MonthlySpendingSummary, SpendingInsight, SpendingStatus,
};
pub use insights_service::InsightsService;
pub use insights_traits::InsightsServiceTrait;
pub use spending_scorer::{analyze_spending, status_for_score, NO_TRANSACTIONS_ADVICE};
pub use spending_summary::summarize_month;

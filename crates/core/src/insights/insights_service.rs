use chrono::DateTime;
use chrono_tz::Tz;
use log::debug;
use std::sync::Arc;

use super::insights_model::{MonthlySpendingSummary, SpendingInsight};
use super::insights_traits::InsightsServiceTrait;
use super::spending_scorer::analyze_spending;
use super::spending_summary::summarize_month;
use crate::errors::{Error, Result};
use crate::profiles::{UserProfile, UserProfileRepositoryTrait};
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::utils::time_utils::Clock;

/// Service computing spending insights in the campus timezone.
pub struct InsightsService {
    profile_repository: Arc<dyn UserProfileRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl InsightsService {
    pub fn new(
        profile_repository: Arc<dyn UserProfileRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        Self {
            profile_repository,
            transaction_repository,
            clock,
            timezone,
        }
    }

    /// Loads the inputs and captures "now" once for the whole computation.
    fn load(&self, user_id: &str) -> Result<(UserProfile, Vec<Transaction>, DateTime<Tz>)> {
        let profile = self
            .profile_repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("Profile {}", user_id)))?;
        let transactions = self.transaction_repository.list_by_user(user_id)?;
        let now = self.clock.now_utc().with_timezone(&self.timezone);
        Ok((profile, transactions, now))
    }
}

impl InsightsServiceTrait for InsightsService {
    fn get_spending_insight(&self, user_id: &str) -> Result<SpendingInsight> {
        let (profile, transactions, now) = self.load(user_id)?;
        let insight = analyze_spending(&profile, &transactions, now);
        debug!(
            "Spending status for user {} at {}: {} ({} advice)",
            user_id,
            now,
            insight.status.as_str(),
            insight.advice.len()
        );
        Ok(insight)
    }

    fn get_monthly_summary(&self, user_id: &str) -> Result<MonthlySpendingSummary> {
        let (profile, transactions, now) = self.load(user_id)?;
        Ok(summarize_month(&profile, &transactions, now))
    }
}

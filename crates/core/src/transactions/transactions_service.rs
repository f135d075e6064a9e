use log::debug;
use std::sync::Arc;

use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Error, Result};
use crate::utils::time_utils::Clock;

/// Service for recording and listing purchases
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn record_transaction(&self, mut new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        if new_transaction.date.is_none() {
            new_transaction.date = Some(self.clock.now_utc());
        }
        debug!(
            "Recording {} purchase of {} at {} for user {}",
            new_transaction.vendor_category,
            new_transaction.amount,
            new_transaction.vendor,
            new_transaction.user_id
        );

        self.repository
            .create_many(vec![new_transaction])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Unexpected("Repository stored no transaction".to_string()))
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_by_user(user_id)
    }
}

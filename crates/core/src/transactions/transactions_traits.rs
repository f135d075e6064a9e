//! Transaction repository and service traits.

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Trait defining the contract for the append-only purchase log.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Appends a batch of purchases atomically and returns them as stored.
    ///
    /// Every entry carries a resolved `date`; IDs are assigned when absent.
    async fn create_many(&self, new_transactions: Vec<NewTransaction>) -> Result<Vec<Transaction>>;

    /// Lists a user's purchases, newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn record_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}

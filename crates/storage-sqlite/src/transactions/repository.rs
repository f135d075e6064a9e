use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use tracksmart_core::errors::Result;
use tracksmart_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn create_many(&self, new_transactions: Vec<NewTransaction>) -> Result<Vec<Transaction>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Transaction>> {
                let now = Utc::now().naive_utc();
                let mut stored = Vec::with_capacity(new_transactions.len());
                for new_transaction in new_transactions {
                    let id = new_transaction
                        .id
                        .clone()
                        .unwrap_or_else(|| Uuid::now_v7().to_string());
                    let row = TransactionDB::from_new(id, new_transaction, now)?;
                    let inserted = diesel::insert_into(transactions::table)
                        .values(&row)
                        .returning(TransactionDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    stored.push(Transaction::try_from(inserted)?);
                }
                debug!("Stored {} transaction(s)", stored.len());
                Ok(stored)
            })
            .await
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((
                transactions::transaction_date.desc(),
                transactions::id.desc(),
            ))
            .select(TransactionDB::as_select())
            .load(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_database;
    use crate::profiles::UserProfileRepository;
    use chrono::{DateTime, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tracksmart_core::errors::{DatabaseError, Error};
    use tracksmart_core::profiles::{MealPlan, NewUserProfile, UserProfileRepositoryTrait};
    use tracksmart_core::transactions::{OrderItem, OrderStatus, VendorCategory};

    async fn repository_with_user(user_id: &str) -> (TransactionRepository, tempfile::TempDir) {
        let (pool, writer, dir) = open_test_database();
        UserProfileRepository::new(pool.clone(), writer.clone())
            .create(NewUserProfile {
                id: Some(user_id.to_string()),
                full_name: "Ada Obi".to_string(),
                email: format!("{}@campus.edu", user_id),
                student_id: "CSC/2021/001".to_string(),
                monthly_allowance: dec!(60000),
                meal_plan: MealPlan::TwoMeal,
                financial_goal: String::new(),
                financial_goal_amount: None,
            })
            .await
            .unwrap();
        (TransactionRepository::new(pool, writer), dir)
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn purchase(user_id: &str, amount: Decimal, date: DateTime<Utc>) -> NewTransaction {
        NewTransaction {
            id: None,
            user_id: user_id.to_string(),
            amount,
            vendor: "Campus Grill".to_string(),
            vendor_category: VendorCategory::SchoolCafeteria,
            items: vec![OrderItem {
                name: "Jollof rice".to_string(),
                price: dec!(1500),
                quantity: 2,
            }],
            status: OrderStatus::Placed,
            coupon_used: true,
            coupon_amount: dec!(3000) - amount,
            cash_used: false,
            date: Some(date),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_newest_first() {
        let (repo, _dir) = repository_with_user("ada").await;

        let created = repo
            .create_many(vec![
                purchase("ada", dec!(500), at(3, 9)),
                purchase("ada", dec!(250.75), at(12, 18)),
            ])
            .await
            .unwrap();
        repo.create_many(vec![purchase("ada", dec!(0), at(7, 12))])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(created[1].amount, dec!(250.75));
        assert_eq!(created[1].items[0].quantity, 2);
        assert_eq!(created[1].date, at(12, 18));

        let listed = repo.list_by_user("ada").unwrap();
        let dates: Vec<DateTime<Utc>> = listed.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![at(12, 18), at(7, 12), at(3, 9)]);
        assert_eq!(listed[0], created[1]);
        assert!(repo.list_by_user("someone-else").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_stores_nothing() {
        let (repo, _dir) = repository_with_user("ada").await;

        let err = repo
            .create_many(vec![
                purchase("ada", dec!(500), at(3, 9)),
                purchase("unknown-user", dec!(500), at(3, 10)),
            ])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
        assert!(repo.list_by_user("ada").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undated_purchase_is_rejected() {
        let (repo, _dir) = repository_with_user("ada").await;
        let mut undated = purchase("ada", dec!(500), at(3, 9));
        undated.date = None;

        let err = repo.create_many(vec![undated]).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.list_by_user("ada").unwrap().is_empty());
    }
}

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::CouponLedgerDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::coupon_ledgers;
use crate::utils::format_date;
use tracksmart_core::coupons::{CouponKey, CouponLedger, CouponStoreTrait};
use tracksmart_core::errors::Result;

/// Coupon store backed by the `coupon_ledgers` table.
///
/// Writes go through the single writer actor, so the read and the write of a
/// compare-and-swap happen in one `IMMEDIATE` transaction.
pub struct CouponLedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CouponLedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CouponLedgerRepository { pool, writer }
    }
}

fn load_ledger(
    conn: &mut SqliteConnection,
    key: &CouponKey,
) -> std::result::Result<Option<CouponLedger>, StorageError> {
    coupon_ledgers::table
        .find((&key.user_id, format_date(key.date)))
        .select(CouponLedgerDB::as_select())
        .first(conn)
        .optional()?
        .map(CouponLedger::try_from)
        .transpose()
}

fn upsert_ledger(
    conn: &mut SqliteConnection,
    key: &CouponKey,
    ledger: &CouponLedger,
) -> std::result::Result<(), StorageError> {
    let row = CouponLedgerDB::from_domain(key, ledger, Utc::now().naive_utc());
    diesel::insert_into(coupon_ledgers::table)
        .values(&row)
        .on_conflict((coupon_ledgers::user_id, coupon_ledgers::ledger_date))
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

#[async_trait]
impl CouponStoreTrait for CouponLedgerRepository {
    fn get(&self, key: &CouponKey) -> Result<Option<CouponLedger>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_ledger(&mut conn, key)?)
    }

    async fn put(&self, key: &CouponKey, ledger: CouponLedger) -> Result<()> {
        let key = key.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                Ok(upsert_ledger(conn, &key, &ledger)?)
            })
            .await
    }

    async fn compare_and_swap(
        &self,
        key: &CouponKey,
        expected: Option<&CouponLedger>,
        replacement: CouponLedger,
    ) -> Result<bool> {
        let key = key.clone();
        let expected = expected.cloned();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let current = load_ledger(conn, &key)?;
                if current != expected {
                    debug!(
                        "Coupon ledger for {} on {} changed since it was read",
                        key.user_id, key.date
                    );
                    return Ok(false);
                }
                upsert_ledger(conn, &key, &replacement)?;
                Ok(true)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_test_database;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tracksmart_core::coupons::{CouponService, CouponServiceTrait};
    use tracksmart_core::profiles::MealPlan;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn ledger(value: Decimal) -> CouponLedger {
        CouponLedger {
            initial_value: dec!(4000),
            value,
            is_valid: value > Decimal::ZERO,
            date: today(),
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (pool, writer, _dir) = open_test_database();
        let repo = CouponLedgerRepository::new(pool, writer);
        let key = CouponKey::new("ada", today());

        assert!(repo.get(&key).unwrap().is_none());

        repo.put(&key, ledger(dec!(2500.50))).await.unwrap();
        assert_eq!(repo.get(&key).unwrap(), Some(ledger(dec!(2500.50))));

        repo.put(&key, ledger(dec!(100))).await.unwrap();
        assert_eq!(repo.get(&key).unwrap(), Some(ledger(dec!(100))));

        let tomorrow = CouponKey::new("ada", today().succ_opt().unwrap());
        assert!(repo.get(&tomorrow).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_compare_and_swap() {
        let (pool, writer, _dir) = open_test_database();
        let repo = CouponLedgerRepository::new(pool, writer);
        let key = CouponKey::new("ada", today());

        // Insert-if-absent
        assert!(repo
            .compare_and_swap(&key, None, ledger(dec!(4000)))
            .await
            .unwrap());
        assert!(!repo
            .compare_and_swap(&key, None, ledger(dec!(4000)))
            .await
            .unwrap());

        // Swap only against the current value
        assert!(repo
            .compare_and_swap(&key, Some(&ledger(dec!(4000))), ledger(dec!(2500)))
            .await
            .unwrap());
        assert!(!repo
            .compare_and_swap(&key, Some(&ledger(dec!(4000))), ledger(dec!(1000)))
            .await
            .unwrap());

        assert_eq!(repo.get(&key).unwrap(), Some(ledger(dec!(2500))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_draw_downs_never_overspend() {
        let (pool, writer, _dir) = open_test_database();
        let service = Arc::new(CouponService::new(Arc::new(CouponLedgerRepository::new(
            pool, writer,
        ))));
        service
            .get_or_create_today_coupon("ada", MealPlan::TwoMeal, today())
            .await
            .unwrap();

        let handles: Vec<_> = (0..12)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .draw_down("ada", today(), dec!(700))
                        .await
                        .unwrap()
                        .deducted
                })
            })
            .collect();

        let mut deducted = Decimal::ZERO;
        for handle in futures::future::join_all(handles).await {
            deducted += handle.unwrap();
        }

        assert_eq!(deducted, dec!(4000));
        let left = service.get_today_coupon("ada", today()).unwrap().unwrap();
        assert_eq!(left.value, Decimal::ZERO);
        assert!(!left.is_valid);
    }
}

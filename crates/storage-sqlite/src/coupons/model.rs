//! Database model for coupon ledgers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{format_date, parse_date, parse_decimal};
use tracksmart_core::coupons::{CouponKey, CouponLedger};

/// One row per user per campus day.
#[derive(Queryable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::coupon_ledgers)]
#[diesel(primary_key(user_id, ledger_date))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CouponLedgerDB {
    pub user_id: String,
    pub ledger_date: String,
    pub initial_value: String,
    pub value: String,
    pub is_valid: bool,
    pub updated_at: NaiveDateTime,
}

impl CouponLedgerDB {
    /// Row for `ledger` stored under `key`; the key's day is the row's day.
    pub fn from_domain(key: &CouponKey, ledger: &CouponLedger, now: NaiveDateTime) -> Self {
        Self {
            user_id: key.user_id.clone(),
            ledger_date: format_date(key.date),
            initial_value: ledger.initial_value.to_string(),
            value: ledger.value.to_string(),
            is_valid: ledger.is_valid,
            updated_at: now,
        }
    }
}

impl TryFrom<CouponLedgerDB> for CouponLedger {
    type Error = StorageError;

    fn try_from(db: CouponLedgerDB) -> Result<Self, Self::Error> {
        Ok(Self {
            initial_value: parse_decimal(&db.initial_value, "initial_value")?,
            value: parse_decimal(&db.value, "value")?,
            is_valid: db.is_valid,
            date: parse_date(&db.ledger_date, "ledger_date")?,
        })
    }
}

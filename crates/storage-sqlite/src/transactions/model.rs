//! Database models for purchases.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{format_instant, parse_decimal, parse_instant};
use tracksmart_core::errors::ValidationError;
use tracksmart_core::transactions::{NewTransaction, OrderItem, Transaction};

/// Database model for purchases.
///
/// `items` holds the order lines as a JSON array and `transaction_date` an
/// RFC 3339 UTC instant.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub vendor: String,
    pub vendor_category: String,
    pub items: String,
    pub status: String,
    pub coupon_used: bool,
    pub coupon_amount: String,
    pub cash_used: bool,
    pub transaction_date: String,
    pub created_at: NaiveDateTime,
}

impl TransactionDB {
    pub fn from_new(
        id: String,
        new_transaction: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        let date = new_transaction.date.ok_or_else(|| {
            StorageError::Core(ValidationError::MissingField("date".to_string()).into())
        })?;
        Ok(Self {
            id,
            user_id: new_transaction.user_id,
            amount: new_transaction.amount.to_string(),
            vendor: new_transaction.vendor,
            vendor_category: new_transaction.vendor_category.as_str().to_string(),
            items: serde_json::to_string(&new_transaction.items)?,
            status: new_transaction.status.as_str().to_string(),
            coupon_used: new_transaction.coupon_used,
            coupon_amount: new_transaction.coupon_amount.to_string(),
            cash_used: new_transaction.cash_used,
            transaction_date: format_instant(date),
            created_at: now,
        })
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&db.items)?;
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            vendor_category: db.vendor_category.parse().map_err(|_| {
                StorageError::CorruptValue {
                    field: "vendor_category",
                    value: db.vendor_category.clone(),
                }
            })?,
            status: db.status.parse().map_err(|_| StorageError::CorruptValue {
                field: "status",
                value: db.status.clone(),
            })?,
            coupon_amount: parse_decimal(&db.coupon_amount, "coupon_amount")?,
            date: parse_instant(&db.transaction_date, "transaction_date")?,
            items,
            id: db.id,
            user_id: db.user_id,
            vendor: db.vendor,
            coupon_used: db.coupon_used,
            cash_used: db.cash_used,
        })
    }
}

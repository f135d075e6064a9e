//! Cart, quote, and receipt models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coupons::CouponLedger;
use crate::transactions::{OrderItem, Transaction, VendorCategory};
use crate::utils::decimal_utils::{saturating_sum, validate_amount};
use crate::{errors::ValidationError, Error, Result};

/// One item in the cart, tagged with the vendor selling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub vendor: String,
    pub vendor_category: VendorCategory,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn validate(&self) -> Result<()> {
        if self.vendor.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "vendor".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        validate_amount(&format!("{}.price", self.name), self.price)?;
        if self.quantity == 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity of '{}' must be at least 1",
                self.name
            ))));
        }
        validate_amount(&format!("{}.total", self.name), self.line_total())
    }

    pub(crate) fn to_order_item(&self) -> OrderItem {
        OrderItem {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Cart submitted for a quote or an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,
    /// Paid at the counter rather than by card
    #[serde(default)]
    pub cash_used: bool,
}

impl Cart {
    pub fn validate(&self) -> Result<()> {
        if self.lines.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Cart is empty".to_string(),
            )));
        }
        self.lines.iter().try_for_each(CartLine::validate)?;
        // Bounds every vendor subtotal, so nothing fails after the coupon is spent
        validate_amount("cartTotal", self.total())
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(self.lines.iter().map(CartLine::line_total))
    }

    /// Total of the lines the daily coupon may be applied to.
    pub fn coupon_eligible_subtotal(&self) -> Decimal {
        saturating_sum(
            self.lines
                .iter()
                .filter(|l| l.vendor_category.is_coupon_eligible())
                .map(CartLine::line_total),
        )
    }
}

/// Price breakdown shown before paying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub cart_total: Decimal,
    pub cafeteria_subtotal: Decimal,
    pub coupon: Option<CouponLedger>,
    pub potential_discount: Decimal,
    pub amount_due: Decimal,
}

/// Result of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// One per vendor that had something to charge or a coupon to apply
    pub transactions: Vec<Transaction>,
    pub coupon_savings: Decimal,
    pub amount_paid: Decimal,
    /// Today's coupon after the order
    pub coupon: Option<CouponLedger>,
}

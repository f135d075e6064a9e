//! Purchase transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_utils::validate_amount;
use crate::{errors::ValidationError, Error, Result};

/// Classification of the vendor a purchase was made from.
///
/// Declaration order doubles as the tie-break order when two categories
/// have the same spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VendorCategory {
    #[serde(rename = "School Cafeteria")]
    SchoolCafeteria,
    #[serde(rename = "Private Food Vendors")]
    PrivateFoodVendors,
    #[serde(rename = "Gadget Vendors")]
    GadgetVendors,
    #[serde(rename = "Health & Utility Vendors")]
    HealthUtilityVendors,
}

impl VendorCategory {
    pub const ALL: [VendorCategory; 4] = [
        VendorCategory::SchoolCafeteria,
        VendorCategory::PrivateFoodVendors,
        VendorCategory::GadgetVendors,
        VendorCategory::HealthUtilityVendors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendorCategory::SchoolCafeteria => "School Cafeteria",
            VendorCategory::PrivateFoodVendors => "Private Food Vendors",
            VendorCategory::GadgetVendors => "Gadget Vendors",
            VendorCategory::HealthUtilityVendors => "Health & Utility Vendors",
        }
    }

    /// Only cafeteria purchases may draw on the daily meal coupon.
    pub fn is_coupon_eligible(&self) -> bool {
        matches!(self, VendorCategory::SchoolCafeteria)
    }
}

impl fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VendorCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown vendor category '{}'",
                    s
                )))
            })
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Placed,
    #[serde(rename = "In Preparation")]
    InPreparation,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    #[serde(rename = "Picked Up")]
    PickedUp,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::InPreparation => "In Preparation",
            OrderStatus::ReadyForPickup => "Ready for Pickup",
            OrderStatus::PickedUp => "Picked Up",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Placed" => Ok(OrderStatus::Placed),
            "In Preparation" => Ok(OrderStatus::InPreparation),
            "Ready for Pickup" => Ok(OrderStatus::ReadyForPickup),
            "Picked Up" => Ok(OrderStatus::PickedUp),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown order status '{}'",
                other
            )))),
        }
    }
}

/// A single line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Domain model representing a recorded purchase. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Amount actually paid, after any coupon discount
    pub amount: Decimal,
    pub vendor: String,
    pub vendor_category: VendorCategory,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub coupon_used: bool,
    pub coupon_amount: Decimal,
    pub cash_used: bool,
    pub date: DateTime<Utc>,
}

/// Input model for recording a new purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub amount: Decimal,
    pub vendor: String,
    pub vendor_category: VendorCategory,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub coupon_used: bool,
    #[serde(default)]
    pub coupon_amount: Decimal,
    #[serde(default)]
    pub cash_used: bool,
    /// Defaults to the time of recording when absent
    pub date: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Validates amounts and coupon consistency.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.vendor.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "vendor".to_string(),
            )));
        }
        validate_amount("amount", self.amount)?;
        validate_amount("couponAmount", self.coupon_amount)?;
        if self.coupon_used != (self.coupon_amount > Decimal::ZERO) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "couponUsed must be set exactly when a coupon amount is applied".to_string(),
            )));
        }
        if self.coupon_used && !self.vendor_category.is_coupon_eligible() {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Coupons cannot be applied to {} purchases",
                self.vendor_category
            ))));
        }
        for item in &self.items {
            validate_amount(&format!("items[{}].price", item.name), item.price)?;
        }
        Ok(())
    }
}

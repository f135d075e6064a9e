//! Request bodies whose user id comes from the path rather than the payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracksmart_core::profiles::{MealPlan, UserProfileUpdate};
use tracksmart_core::transactions::{NewTransaction, OrderItem, OrderStatus, VendorCategory};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: String,
    pub student_id: String,
    pub monthly_allowance: Decimal,
    pub meal_plan: MealPlan,
    #[serde(default)]
    pub financial_goal: String,
    pub financial_goal_amount: Option<Decimal>,
}

impl ProfileUpdateRequest {
    pub fn into_update(self, user_id: String) -> UserProfileUpdate {
        UserProfileUpdate {
            id: user_id,
            full_name: self.full_name,
            student_id: self.student_id,
            monthly_allowance: self.monthly_allowance,
            meal_plan: self.meal_plan,
            financial_goal: self.financial_goal,
            financial_goal_amount: self.financial_goal_amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionRequest {
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
    pub date: Option<DateTime<Utc>>,
}

impl RecordTransactionRequest {
    pub fn into_new_transaction(self, user_id: String) -> NewTransaction {
        NewTransaction {
            id: None,
            user_id,
            amount: self.amount,
            vendor: self.vendor,
            vendor_category: self.vendor_category,
            items: self.items,
            status: self.status,
            coupon_used: self.coupon_used,
            coupon_amount: self.coupon_amount,
            cash_used: self.cash_used,
            date: self.date,
        }
    }
}

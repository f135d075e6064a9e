use async_trait::async_trait;

use super::checkout_model::{Cart, CheckoutQuote, CheckoutReceipt};
use crate::errors::Result;
use crate::profiles::MealPlan;

/// Trait defining the contract for checkout operations.
#[async_trait]
pub trait CheckoutServiceTrait: Send + Sync {
    /// Prices a cart against today's coupon without spending it.
    async fn quote(&self, user_id: &str, meal_plan: MealPlan, cart: &Cart)
        -> Result<CheckoutQuote>;

    /// Spends the coupon on cafeteria orders and records one purchase per vendor.
    async fn place_order(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        cart: Cart,
    ) -> Result<CheckoutReceipt>;
}

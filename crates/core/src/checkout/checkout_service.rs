use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::checkout_model::{Cart, CartLine, CheckoutQuote, CheckoutReceipt};
use super::checkout_traits::CheckoutServiceTrait;
use crate::coupons::{CouponLedger, CouponServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::profiles::MealPlan;
use crate::transactions::{NewTransaction, OrderStatus, TransactionRepositoryTrait, VendorCategory};
use crate::utils::decimal_utils::saturating_sum;
use crate::utils::time_utils::{campus_date_from_utc, Clock};
use crate::Error;

/// Lines sold by one vendor, in cart order.
struct VendorOrder<'a> {
    vendor: &'a str,
    category: VendorCategory,
    lines: Vec<&'a CartLine>,
}

impl VendorOrder<'_> {
    fn subtotal(&self) -> Decimal {
        saturating_sum(self.lines.iter().map(|l| l.line_total()))
    }
}

/// Groups lines by vendor, keeping the order vendors first appear in.
fn group_by_vendor(cart: &Cart) -> Result<Vec<VendorOrder<'_>>> {
    let mut orders: Vec<VendorOrder<'_>> = Vec::new();
    for line in &cart.lines {
        match orders.iter_mut().find(|o| o.vendor == line.vendor) {
            Some(order) if order.category != line.vendor_category => {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Vendor '{}' is listed under both {} and {}",
                    line.vendor, order.category, line.vendor_category
                ))));
            }
            Some(order) => order.lines.push(line),
            None => orders.push(VendorOrder {
                vendor: &line.vendor,
                category: line.vendor_category,
                lines: vec![line],
            }),
        }
    }
    Ok(orders)
}

/// Service turning carts into recorded purchases.
pub struct CheckoutService {
    coupon_service: Arc<dyn CouponServiceTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl CheckoutService {
    pub fn new(
        coupon_service: Arc<dyn CouponServiceTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        Self {
            coupon_service,
            transaction_repository,
            clock,
            timezone,
        }
    }

    /// Prices `cart` against the coupon for campus day `today`.
    pub async fn quote_on(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        cart: &Cart,
        today: NaiveDate,
    ) -> Result<CheckoutQuote> {
        cart.validate()?;
        let coupon = self
            .coupon_service
            .get_or_create_today_coupon(user_id, meal_plan, today)
            .await?;

        let cart_total = cart.total();
        let cafeteria_subtotal = cart.coupon_eligible_subtotal();
        let available = coupon
            .as_ref()
            .filter(|c| c.is_usable())
            .map(|c| c.value)
            .unwrap_or_default();
        let potential_discount = cafeteria_subtotal.min(available);

        Ok(CheckoutQuote {
            cart_total,
            cafeteria_subtotal,
            coupon,
            potential_discount,
            amount_due: cart_total - potential_discount,
        })
    }

    /// Places the order as of `now`.
    ///
    /// The coupon is drawn down once per cafeteria vendor before the purchases
    /// are written as one batch.
    pub async fn place_order_at(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        cart: Cart,
        now: DateTime<Utc>,
    ) -> Result<CheckoutReceipt> {
        cart.validate()?;
        let today = campus_date_from_utc(now, self.timezone);
        let mut coupon: Option<CouponLedger> = self
            .coupon_service
            .get_or_create_today_coupon(user_id, meal_plan, today)
            .await?;

        let mut batch = Vec::new();
        let mut coupon_savings = Decimal::ZERO;
        for order in group_by_vendor(&cart)? {
            let subtotal = order.subtotal();
            let (amount, coupon_amount) = if order.category.is_coupon_eligible()
                && subtotal > Decimal::ZERO
            {
                let outcome = self
                    .coupon_service
                    .draw_down(user_id, today, subtotal)
                    .await?;
                if outcome.ledger.is_some() {
                    coupon = outcome.ledger;
                }
                (outcome.amount_owed, outcome.deducted)
            } else {
                (subtotal, Decimal::ZERO)
            };

            let coupon_used = coupon_amount > Decimal::ZERO;
            if amount.is_zero() && !coupon_used {
                debug!("Skipping free order from {} for user {}", order.vendor, user_id);
                continue;
            }
            coupon_savings = coupon_savings.saturating_add(coupon_amount);

            let new_transaction = NewTransaction {
                id: None,
                user_id: user_id.to_string(),
                amount,
                vendor: order.vendor.to_string(),
                vendor_category: order.category,
                items: order.lines.iter().map(|l| l.to_order_item()).collect(),
                status: OrderStatus::Placed,
                coupon_used,
                coupon_amount,
                cash_used: cart.cash_used,
                date: Some(now),
            };
            new_transaction.validate()?;
            batch.push(new_transaction);
        }

        let transactions = if batch.is_empty() {
            Vec::new()
        } else {
            self.transaction_repository.create_many(batch).await?
        };
        let amount_paid = saturating_sum(transactions.iter().map(|t| t.amount));

        info!(
            "User {} placed {} order(s): paid {}, coupon covered {}",
            user_id,
            transactions.len(),
            amount_paid,
            coupon_savings
        );

        Ok(CheckoutReceipt {
            transactions,
            coupon_savings,
            amount_paid,
            coupon,
        })
    }
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn quote(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        cart: &Cart,
    ) -> Result<CheckoutQuote> {
        let today = campus_date_from_utc(self.clock.now_utc(), self.timezone);
        self.quote_on(user_id, meal_plan, cart, today).await
    }

    async fn place_order(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        cart: Cart,
    ) -> Result<CheckoutReceipt> {
        let now = self.clock.now_utc();
        self.place_order_at(user_id, meal_plan, cart, now).await
    }
}

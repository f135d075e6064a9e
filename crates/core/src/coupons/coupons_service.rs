use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::coupon_ledger::{draw_down, issue_coupon};
use super::coupons_errors::CouponError;
use super::coupons_model::{CouponKey, CouponLedger, DrawDown};
use super::coupons_traits::{CouponServiceTrait, CouponStoreTrait};
use crate::constants::MAX_COUPON_SWAP_ATTEMPTS;
use crate::errors::{Error, Result, ValidationError};
use crate::profiles::MealPlan;

/// Service issuing and spending daily cafeteria coupons.
///
/// All writes go through the store's compare-and-swap, so concurrent
/// draw-downs for the same user and day never spend more than the day's value.
pub struct CouponService {
    store: Arc<dyn CouponStoreTrait>,
}

impl CouponService {
    pub fn new(store: Arc<dyn CouponStoreTrait>) -> Self {
        CouponService { store }
    }

    fn contention(user_id: &str, today: NaiveDate) -> Error {
        Error::Coupon(CouponError::Contention {
            user_id: user_id.to_string(),
            date: today,
            attempts: MAX_COUPON_SWAP_ATTEMPTS,
        })
    }
}

#[async_trait]
impl CouponServiceTrait for CouponService {
    async fn get_or_create_today_coupon(
        &self,
        user_id: &str,
        meal_plan: MealPlan,
        today: NaiveDate,
    ) -> Result<Option<CouponLedger>> {
        let Some(fresh) = issue_coupon(meal_plan, today) else {
            debug!("Meal plan {} has no coupon for user {}", meal_plan, user_id);
            return Ok(None);
        };

        let key = CouponKey::new(user_id, today);
        for _ in 0..MAX_COUPON_SWAP_ATTEMPTS {
            let stored = self.store.get(&key)?;
            if let Some(ledger) = stored.as_ref().filter(|l| l.is_current(today)) {
                return Ok(Some(ledger.clone()));
            }

            // Absent or stale: replace it, unless another caller got there first
            if self
                .store
                .compare_and_swap(&key, stored.as_ref(), fresh.clone())
                .await?
            {
                info!(
                    "Issued {} coupon worth {} to user {} for {}",
                    meal_plan, fresh.initial_value, user_id, today
                );
                return Ok(Some(fresh));
            }
        }

        Err(Self::contention(user_id, today))
    }

    fn get_today_coupon(&self, user_id: &str, today: NaiveDate) -> Result<Option<CouponLedger>> {
        Ok(self
            .store
            .get(&CouponKey::new(user_id, today))?
            .filter(|l| l.is_current(today)))
    }

    async fn draw_down(
        &self,
        user_id: &str,
        today: NaiveDate,
        purchase_amount: Decimal,
    ) -> Result<DrawDown> {
        if purchase_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NegativeAmount {
                field: "purchaseAmount".to_string(),
                value: purchase_amount.to_string(),
            }));
        }

        let key = CouponKey::new(user_id, today);
        for attempt in 1..=MAX_COUPON_SWAP_ATTEMPTS {
            let current = self.store.get(&key)?.filter(|l| l.is_current(today));
            let outcome = draw_down(current.as_ref(), purchase_amount);

            let Some(updated) = outcome.ledger.clone().filter(|_| !outcome.deducted.is_zero())
            else {
                return Ok(outcome);
            };

            if self
                .store
                .compare_and_swap(&key, current.as_ref(), updated)
                .await?
            {
                debug!(
                    "Coupon covered {} of {} for user {} ({} left)",
                    outcome.deducted,
                    purchase_amount,
                    user_id,
                    outcome.ledger.as_ref().map(|l| l.value).unwrap_or_default()
                );
                return Ok(outcome);
            }

            debug!(
                "Coupon ledger for user {} changed concurrently, retrying (attempt {})",
                user_id, attempt
            );
        }

        warn!(
            "Giving up coupon draw-down for user {} on {} after {} attempts",
            user_id, today, MAX_COUPON_SWAP_ATTEMPTS
        );
        Err(Self::contention(user_id, today))
    }
}

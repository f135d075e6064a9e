use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::coupons_errors::CouponError;
use super::coupons_model::{CouponKey, CouponLedger};
use super::coupons_traits::CouponStoreTrait;
use crate::errors::Result;

/// Process-local coupon store.
///
/// A single mutex guards the map, so every compare-and-swap is atomic.
#[derive(Debug, Default)]
pub struct InMemoryCouponStore {
    ledgers: Mutex<HashMap<CouponKey, CouponLedger>>,
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CouponKey, CouponLedger>>> {
        self.ledgers
            .lock()
            .map_err(|e| CouponError::StoreUnavailable(e.to_string()).into())
    }
}

#[async_trait]
impl CouponStoreTrait for InMemoryCouponStore {
    fn get(&self, key: &CouponKey) -> Result<Option<CouponLedger>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&self, key: &CouponKey, ledger: CouponLedger) -> Result<()> {
        self.lock()?.insert(key.clone(), ledger);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &CouponKey,
        expected: Option<&CouponLedger>,
        replacement: CouponLedger,
    ) -> Result<bool> {
        let mut ledgers = self.lock()?;
        if ledgers.get(key) != expected {
            return Ok(false);
        }
        ledgers.insert(key.clone(), replacement);
        Ok(true)
    }
}

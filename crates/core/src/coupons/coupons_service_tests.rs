//! Unit tests for the coupon service.

#[cfg(test)]
mod tests {
    use crate::coupons::{
        CouponError, CouponKey, CouponLedger, CouponService, CouponServiceTrait, CouponStoreTrait,
        InMemoryCouponStore,
    };
    use crate::errors::{Error, Result};
    use crate::profiles::MealPlan;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const USER: &str = "student-42";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn yesterday() -> NaiveDate {
        today().pred_opt().unwrap()
    }

    fn service_with_store() -> (CouponService, Arc<InMemoryCouponStore>) {
        let store = Arc::new(InMemoryCouponStore::new());
        (CouponService::new(store.clone()), store)
    }

    // ==================== Daily issue ====================

    #[tokio::test]
    async fn test_first_call_issues_and_persists_coupon() {
        let (service, store) = service_with_store();

        let ledger = service
            .get_or_create_today_coupon(USER, MealPlan::TwoMeal, today())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ledger.initial_value, dec!(4000));
        assert_eq!(ledger.value, dec!(4000));
        assert!(ledger.is_valid);
        assert_eq!(ledger.date, today());
        assert_eq!(
            store.get(&CouponKey::new(USER, today())).unwrap(),
            Some(ledger)
        );
    }

    #[tokio::test]
    async fn test_existing_coupon_for_today_is_returned_unchanged() {
        let (service, store) = service_with_store();
        let partly_used = CouponLedger {
            initial_value: dec!(6000),
            value: dec!(1750),
            is_valid: true,
            date: today(),
        };
        store
            .put(&CouponKey::new(USER, today()), partly_used.clone())
            .await
            .unwrap();

        let ledger = service
            .get_or_create_today_coupon(USER, MealPlan::ThreeMeal, today())
            .await
            .unwrap();

        assert_eq!(ledger, Some(partly_used));
    }

    #[tokio::test]
    async fn test_yesterdays_exhausted_coupon_resets_today() {
        let (service, store) = service_with_store();
        store
            .put(
                &CouponKey::new(USER, yesterday()),
                CouponLedger {
                    initial_value: dec!(4000),
                    value: dec!(0),
                    is_valid: false,
                    date: yesterday(),
                },
            )
            .await
            .unwrap();

        let ledger = service
            .get_or_create_today_coupon(USER, MealPlan::TwoMeal, today())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ledger.value, dec!(4000));
        assert_eq!(ledger.initial_value, dec!(4000));
        assert!(ledger.is_valid);
        assert_eq!(ledger.date, today());
    }

    #[tokio::test]
    async fn test_stale_record_under_todays_key_is_replaced() {
        let (service, store) = service_with_store();
        store
            .put(
                &CouponKey::new(USER, today()),
                CouponLedger {
                    initial_value: dec!(4000),
                    value: dec!(10),
                    is_valid: true,
                    date: yesterday(),
                },
            )
            .await
            .unwrap();

        let ledger = service
            .get_or_create_today_coupon(USER, MealPlan::TwoMeal, today())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ledger.date, today());
        assert_eq!(ledger.value, dec!(4000));
    }

    #[tokio::test]
    async fn test_pay_to_eat_has_no_coupon() {
        let (service, store) = service_with_store();

        let ledger = service
            .get_or_create_today_coupon(USER, MealPlan::PayToEat, today())
            .await
            .unwrap();
        assert!(ledger.is_none());
        assert!(store.get(&CouponKey::new(USER, today())).unwrap().is_none());

        let result = service.draw_down(USER, today(), dec!(1500)).await.unwrap();
        assert_eq!(result.amount_owed, dec!(1500));
        assert_eq!(result.deducted, dec!(0));
        assert!(result.ledger.is_none());
    }

    // ==================== Draw-down ====================

    #[tokio::test]
    async fn test_draw_down_persists_each_step() {
        let (service, _store) = service_with_store();
        service
            .get_or_create_today_coupon(USER, MealPlan::TwoMeal, today())
            .await
            .unwrap();

        let first = service.draw_down(USER, today(), dec!(1500)).await.unwrap();
        assert_eq!(first.amount_owed, dec!(0));
        assert_eq!(first.ledger.as_ref().unwrap().value, dec!(2500));

        let second = service.draw_down(USER, today(), dec!(3000)).await.unwrap();
        assert_eq!(second.amount_owed, dec!(500));
        let after = second.ledger.unwrap();
        assert_eq!(after.value, dec!(0));
        assert!(!after.is_valid);

        let stored = service.get_today_coupon(USER, today()).unwrap().unwrap();
        assert_eq!(stored, after);
    }

    #[tokio::test]
    async fn test_exhausted_coupon_leaves_ledger_untouched() {
        let (service, _store) = service_with_store();
        service
            .get_or_create_today_coupon(USER, MealPlan::TwoMeal, today())
            .await
            .unwrap();
        service.draw_down(USER, today(), dec!(4000)).await.unwrap();
        let exhausted = service.get_today_coupon(USER, today()).unwrap().unwrap();

        for amount in [dec!(200), dec!(1500)] {
            let result = service.draw_down(USER, today(), amount).await.unwrap();
            assert_eq!(result.amount_owed, amount);
            assert_eq!(result.ledger.as_ref(), Some(&exhausted));
        }
        assert_eq!(
            service.get_today_coupon(USER, today()).unwrap(),
            Some(exhausted)
        );
    }

    #[tokio::test]
    async fn test_draw_down_without_issued_coupon_charges_full_price() {
        let (service, _store) = service_with_store();
        let result = service.draw_down(USER, today(), dec!(900)).await.unwrap();
        assert_eq!(result.amount_owed, dec!(900));
        assert!(result.ledger.is_none());
    }

    #[tokio::test]
    async fn test_negative_purchase_is_rejected() {
        let (service, _store) = service_with_store();
        let err = service.draw_down(USER, today(), dec!(-5)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_coupons_are_isolated_per_user() {
        let (service, _store) = service_with_store();
        for user in ["a", "b"] {
            service
                .get_or_create_today_coupon(user, MealPlan::TwoMeal, today())
                .await
                .unwrap();
        }

        service.draw_down("a", today(), dec!(3000)).await.unwrap();

        assert_eq!(
            service.get_today_coupon("a", today()).unwrap().unwrap().value,
            dec!(1000)
        );
        assert_eq!(
            service.get_today_coupon("b", today()).unwrap().unwrap().value,
            dec!(4000)
        );
    }

    // ==================== Contention ====================

    /// Store whose swaps always lose, as if another writer always got in first.
    struct AlwaysConflictingStore {
        inner: InMemoryCouponStore,
        swaps: AtomicUsize,
    }

    #[async_trait]
    impl CouponStoreTrait for AlwaysConflictingStore {
        fn get(&self, key: &CouponKey) -> Result<Option<CouponLedger>> {
            self.inner.get(key)
        }

        async fn put(&self, key: &CouponKey, ledger: CouponLedger) -> Result<()> {
            self.inner.put(key, ledger).await
        }

        async fn compare_and_swap(
            &self,
            _key: &CouponKey,
            _expected: Option<&CouponLedger>,
            _replacement: CouponLedger,
        ) -> Result<bool> {
            self.swaps.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_draw_down_gives_up_under_endless_contention() {
        let store = Arc::new(AlwaysConflictingStore {
            inner: InMemoryCouponStore::new(),
            swaps: AtomicUsize::new(0),
        });
        store
            .put(
                &CouponKey::new(USER, today()),
                CouponLedger {
                    initial_value: dec!(4000),
                    value: dec!(4000),
                    is_valid: true,
                    date: today(),
                },
            )
            .await
            .unwrap();
        let service = CouponService::new(store.clone());

        let err = service.draw_down(USER, today(), dec!(100)).await.unwrap_err();

        assert!(matches!(err, Error::Coupon(CouponError::Contention { .. })));
        assert_eq!(
            store.swaps.load(Ordering::SeqCst),
            crate::constants::MAX_COUPON_SWAP_ATTEMPTS
        );
        // Nothing was spent
        assert_eq!(
            store
                .get(&CouponKey::new(USER, today()))
                .unwrap()
                .unwrap()
                .value,
            dec!(4000)
        );
    }
}

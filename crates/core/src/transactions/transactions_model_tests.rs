//! Tests for purchase transaction models.

#[cfg(test)]
mod tests {
    use crate::constants::MAX_AMOUNT;
    use crate::errors::{Error, ValidationError};
    use crate::transactions::{NewTransaction, OrderItem, OrderStatus, VendorCategory};
    use rust_decimal_macros::dec;

    fn cafeteria_purchase() -> NewTransaction {
        NewTransaction {
            id: None,
            user_id: "user-1".to_string(),
            amount: dec!(500),
            vendor: "Main Cafeteria".to_string(),
            vendor_category: VendorCategory::SchoolCafeteria,
            items: vec![OrderItem {
                name: "Jollof Rice & Chicken".to_string(),
                price: dec!(1500),
                quantity: 1,
            }],
            status: OrderStatus::Placed,
            coupon_used: true,
            coupon_amount: dec!(1000),
            cash_used: false,
            date: None,
        }
    }

    // ==================== Serialization ====================

    #[test]
    fn test_vendor_category_serialization() {
        assert_eq!(
            serde_json::to_string(&VendorCategory::HealthUtilityVendors).unwrap(),
            "\"Health & Utility Vendors\""
        );
        assert_eq!(
            serde_json::from_str::<VendorCategory>("\"School Cafeteria\"").unwrap(),
            VendorCategory::SchoolCafeteria
        );
        assert_eq!(
            "Gadget Vendors".parse::<VendorCategory>().unwrap(),
            VendorCategory::GadgetVendors
        );
    }

    #[test]
    fn test_order_status_round_trips_through_str() {
        assert_eq!(
            "Ready for Pickup".parse::<OrderStatus>().unwrap(),
            OrderStatus::ReadyForPickup
        );
        assert_eq!(OrderStatus::InPreparation.as_str(), "In Preparation");
        assert!("Lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_only_cafeteria_is_coupon_eligible() {
        let eligible: Vec<_> = VendorCategory::ALL
            .into_iter()
            .filter(|c| c.is_coupon_eligible())
            .collect();
        assert_eq!(eligible, vec![VendorCategory::SchoolCafeteria]);
    }

    // ==================== Validation ====================

    #[test]
    fn test_valid_coupon_purchase() {
        assert!(cafeteria_purchase().validate().is_ok());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut tx = cafeteria_purchase();
        tx.amount = dec!(-1);
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::NegativeAmount { .. }))
        ));
    }

    #[test]
    fn test_amounts_above_the_maximum_are_rejected() {
        let mut tx = cafeteria_purchase();
        tx.amount = dec!(50000000000000000000000000000);
        assert!(matches!(
            tx.validate(),
            Err(Error::Validation(ValidationError::AmountTooLarge { .. }))
        ));

        let mut tx = cafeteria_purchase();
        tx.coupon_amount = MAX_AMOUNT + dec!(1);
        assert!(tx.validate().is_err());

        let mut tx = cafeteria_purchase();
        tx.items[0].price = MAX_AMOUNT + dec!(1);
        assert!(tx.validate().is_err());

        let mut tx = cafeteria_purchase();
        tx.amount = MAX_AMOUNT;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_coupon_flag_must_match_amount() {
        let mut tx = cafeteria_purchase();
        tx.coupon_used = false;
        assert!(tx.validate().is_err());

        let mut tx = cafeteria_purchase();
        tx.coupon_amount = dec!(0);
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_coupon_rejected_for_non_cafeteria_vendor() {
        let mut tx = cafeteria_purchase();
        tx.vendor = "TechHub".to_string();
        tx.vendor_category = VendorCategory::GadgetVendors;
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            name: "Bottled Water".to_string(),
            price: dec!(200),
            quantity: 3,
        };
        assert_eq!(item.line_total(), dec!(600));
    }
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Days used to spread a monthly allowance into a daily budget
pub const BUDGET_DAYS_PER_MONTH: Decimal = dec!(30);

/// Daily coupon value for the two-meal plan
pub const TWO_MEAL_COUPON_VALUE: Decimal = dec!(4000);

/// Daily coupon value for the three-meal plan
pub const THREE_MEAL_COUPON_VALUE: Decimal = dec!(6000);

/// Attempts a coupon draw-down makes before giving up on a contended ledger
pub const MAX_COUPON_SWAP_ATTEMPTS: usize = 64;

/// Currency symbol used in advice text
pub const CURRENCY_SYMBOL: &str = "₦";

/// Largest amount accepted for any price, purchase, allowance or goal (one trillion naira)
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

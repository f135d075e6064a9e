//! Overflow-safe currency arithmetic and amount bounds.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result, ValidationError};

/// Checks that `value` lies in `0..=MAX_AMOUNT`.
pub fn validate_amount(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NegativeAmount {
            field: field.to_string(),
            value: value.to_string(),
        }));
    }
    if value > MAX_AMOUNT {
        return Err(Error::Validation(ValidationError::AmountTooLarge {
            field: field.to_string(),
            value: value.to_string(),
            max: MAX_AMOUNT.to_string(),
        }));
    }
    Ok(())
}

/// `numerator / denominator`, clamped to `Decimal::MAX`/`Decimal::MIN` on overflow.
///
/// Division by zero yields zero.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `part / whole * 100`, saturating instead of overflowing.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    saturating_div(part, whole).saturating_mul(dec!(100))
}

/// Sum that clamps at the `Decimal` bounds.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

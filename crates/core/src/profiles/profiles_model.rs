//! User profile domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{THREE_MEAL_COUPON_VALUE, TWO_MEAL_COUPON_VALUE};
use crate::utils::decimal_utils::validate_amount;
use crate::{errors::ValidationError, Error, Result};

/// Meal plan tier - selects the starting value of the daily cafeteria coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MealPlan {
    TwoMeal,
    ThreeMeal,
    /// No coupon is issued for this tier
    #[default]
    PayToEat,
}

impl MealPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealPlan::TwoMeal => "two-meal",
            MealPlan::ThreeMeal => "three-meal",
            MealPlan::PayToEat => "pay-to-eat",
        }
    }

    /// Daily coupon value for this tier, or `None` when the tier has no coupon.
    pub fn daily_coupon_value(&self) -> Option<Decimal> {
        match self {
            MealPlan::TwoMeal => Some(TWO_MEAL_COUPON_VALUE),
            MealPlan::ThreeMeal => Some(THREE_MEAL_COUPON_VALUE),
            MealPlan::PayToEat => None,
        }
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPlan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "two-meal" => Ok(MealPlan::TwoMeal),
            "three-meal" => Ok(MealPlan::ThreeMeal),
            "pay-to-eat" => Ok(MealPlan::PayToEat),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown meal plan '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a student's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub monthly_allowance: Decimal,
    pub meal_plan: MealPlan,
    pub financial_goal: String,
    pub financial_goal_amount: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub monthly_allowance: Decimal,
    #[serde(default)]
    pub meal_plan: MealPlan,
    #[serde(default)]
    pub financial_goal: String,
    pub financial_goal_amount: Option<Decimal>,
}

impl NewUserProfile {
    /// Validates the new profile data.
    pub fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fullName".to_string(),
            )));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid email address '{}'",
                self.email
            ))));
        }
        validate_money(self.monthly_allowance, self.financial_goal_amount)
    }
}

/// Input model for updating an existing profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub id: String,
    pub full_name: String,
    pub student_id: String,
    pub monthly_allowance: Decimal,
    pub meal_plan: MealPlan,
    pub financial_goal: String,
    pub financial_goal_amount: Option<Decimal>,
}

impl UserProfileUpdate {
    /// Validates the profile update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Profile ID is required for updates".to_string(),
            )));
        }
        if self.full_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "fullName".to_string(),
            )));
        }
        validate_money(self.monthly_allowance, self.financial_goal_amount)
    }
}

fn validate_money(monthly_allowance: Decimal, goal_amount: Option<Decimal>) -> Result<()> {
    validate_amount("monthlyAllowance", monthly_allowance)?;
    if let Some(goal) = goal_amount {
        if goal <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Financial goal amount must be greater than zero".to_string(),
            )));
        }
        validate_amount("financialGoalAmount", goal)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_AMOUNT;
    use rust_decimal_macros::dec;

    fn new_profile() -> NewUserProfile {
        NewUserProfile {
            id: None,
            full_name: "Ada Obi".to_string(),
            email: "ada@campus.edu".to_string(),
            student_id: "CSC/2021/001".to_string(),
            monthly_allowance: dec!(60000),
            meal_plan: MealPlan::TwoMeal,
            financial_goal: "New laptop".to_string(),
            financial_goal_amount: Some(dec!(150000)),
        }
    }

    #[test]
    fn test_meal_plan_serialization() {
        assert_eq!(
            serde_json::to_string(&MealPlan::TwoMeal).unwrap(),
            "\"two-meal\""
        );
        assert_eq!(
            serde_json::from_str::<MealPlan>("\"pay-to-eat\"").unwrap(),
            MealPlan::PayToEat
        );
        assert_eq!("three-meal".parse::<MealPlan>().unwrap(), MealPlan::ThreeMeal);
        assert!("four-meal".parse::<MealPlan>().is_err());
    }

    #[test]
    fn test_daily_coupon_value_by_tier() {
        assert_eq!(MealPlan::TwoMeal.daily_coupon_value(), Some(dec!(4000)));
        assert_eq!(MealPlan::ThreeMeal.daily_coupon_value(), Some(dec!(6000)));
        assert_eq!(MealPlan::PayToEat.daily_coupon_value(), None);
    }

    #[test]
    fn test_new_profile_validation() {
        assert!(new_profile().validate().is_ok());

        let mut zero_allowance = new_profile();
        zero_allowance.monthly_allowance = Decimal::ZERO;
        assert!(zero_allowance.validate().is_ok());

        let mut negative = new_profile();
        negative.monthly_allowance = dec!(-1);
        assert!(matches!(
            negative.validate(),
            Err(Error::Validation(ValidationError::NegativeAmount { .. }))
        ));

        let mut bad_email = new_profile();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut bad_goal = new_profile();
        bad_goal.financial_goal_amount = Some(Decimal::ZERO);
        assert!(bad_goal.validate().is_err());
    }

    #[test]
    fn test_money_above_the_maximum_is_rejected() {
        let mut rich = new_profile();
        rich.monthly_allowance = dec!(50000000000000000000000000000);
        assert!(matches!(
            rich.validate(),
            Err(Error::Validation(ValidationError::AmountTooLarge { .. }))
        ));

        let mut dreamer = new_profile();
        dreamer.financial_goal_amount = Some(MAX_AMOUNT + dec!(1));
        assert!(matches!(
            dreamer.validate(),
            Err(Error::Validation(ValidationError::AmountTooLarge { .. }))
        ));

        let update = UserProfileUpdate {
            id: "student-1".to_string(),
            full_name: "Ada Obi".to_string(),
            student_id: "CSC/2021/001".to_string(),
            monthly_allowance: MAX_AMOUNT + dec!(1),
            meal_plan: MealPlan::TwoMeal,
            financial_goal: String::new(),
            financial_goal_amount: None,
        };
        assert!(update.validate().is_err());
    }
}

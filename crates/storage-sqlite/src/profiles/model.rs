//! Database models for student profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::parse_decimal;
use tracksmart_core::profiles::{NewUserProfile, UserProfile, UserProfileUpdate};

/// Database model for profiles. Money columns hold Decimal text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserProfileDB {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub monthly_allowance: String,
    pub meal_plan: String,
    pub financial_goal: String,
    pub financial_goal_amount: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns a profile update may change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(treat_none_as_null = true)]
pub struct UserProfileChangesetDB {
    pub full_name: String,
    pub student_id: String,
    pub monthly_allowance: String,
    pub meal_plan: String,
    pub financial_goal: String,
    pub financial_goal_amount: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UserProfileDB {
    pub fn from_new(id: String, new_profile: NewUserProfile, now: NaiveDateTime) -> Self {
        Self {
            id,
            full_name: new_profile.full_name,
            email: new_profile.email,
            student_id: new_profile.student_id,
            monthly_allowance: new_profile.monthly_allowance.to_string(),
            meal_plan: new_profile.meal_plan.as_str().to_string(),
            financial_goal: new_profile.financial_goal,
            financial_goal_amount: new_profile.financial_goal_amount.map(|a| a.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl UserProfileChangesetDB {
    pub fn from_update(update: &UserProfileUpdate, now: NaiveDateTime) -> Self {
        Self {
            full_name: update.full_name.clone(),
            student_id: update.student_id.clone(),
            monthly_allowance: update.monthly_allowance.to_string(),
            meal_plan: update.meal_plan.as_str().to_string(),
            financial_goal: update.financial_goal.clone(),
            financial_goal_amount: update.financial_goal_amount.map(|a| a.to_string()),
            updated_at: now,
        }
    }
}

impl TryFrom<UserProfileDB> for UserProfile {
    type Error = StorageError;

    fn try_from(db: UserProfileDB) -> Result<Self, Self::Error> {
        Ok(Self {
            monthly_allowance: parse_decimal(&db.monthly_allowance, "monthly_allowance")?,
            meal_plan: db.meal_plan.parse().map_err(|_| StorageError::CorruptValue {
                field: "meal_plan",
                value: db.meal_plan.clone(),
            })?,
            financial_goal_amount: db
                .financial_goal_amount
                .as_deref()
                .map(|a| parse_decimal(a, "financial_goal_amount"))
                .transpose()?,
            id: db.id,
            full_name: db.full_name,
            email: db.email,
            student_id: db.student_id,
            financial_goal: db.financial_goal,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

//! Profiles module - domain models, services, and traits.

mod profiles_model;
mod profiles_service;
mod profiles_traits;

pub use profiles_model::{MealPlan, NewUserProfile, UserProfile, UserProfileUpdate};
pub use profiles_service::UserProfileService;
pub use profiles_traits::{UserProfileRepositoryTrait, UserProfileServiceTrait};

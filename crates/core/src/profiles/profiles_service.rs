use log::debug;
use std::sync::Arc;

use super::profiles_model::{NewUserProfile, UserProfile, UserProfileUpdate};
use super::profiles_traits::{UserProfileRepositoryTrait, UserProfileServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing student profiles
pub struct UserProfileService {
    repository: Arc<dyn UserProfileRepositoryTrait>,
}

impl UserProfileService {
    pub fn new(repository: Arc<dyn UserProfileRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserProfileServiceTrait for UserProfileService {
    async fn create_profile(&self, new_profile: NewUserProfile) -> Result<UserProfile> {
        new_profile.validate()?;
        debug!(
            "Creating profile for {} on meal plan {}",
            new_profile.email, new_profile.meal_plan
        );
        self.repository.create(new_profile).await
    }

    async fn update_profile(&self, profile_update: UserProfileUpdate) -> Result<UserProfile> {
        profile_update.validate()?;
        // Surface a NotFound instead of a storage error for unknown profiles
        self.get_profile(&profile_update.id)?;
        self.repository.update(profile_update).await
    }

    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("Profile {}", user_id)))
    }
}

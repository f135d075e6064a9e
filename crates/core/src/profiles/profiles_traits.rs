//! User profile repository and service traits.

use async_trait::async_trait;

use super::profiles_model::{NewUserProfile, UserProfile, UserProfileUpdate};
use crate::errors::Result;

/// Trait defining the contract for profile repository operations.
#[async_trait]
pub trait UserProfileRepositoryTrait: Send + Sync {
    /// Creates a new profile. The implementation assigns an ID when none is given.
    async fn create(&self, new_profile: NewUserProfile) -> Result<UserProfile>;

    /// Updates an existing profile.
    async fn update(&self, profile_update: UserProfileUpdate) -> Result<UserProfile>;

    /// Retrieves a profile by its ID, `None` when absent.
    fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;
}

/// Trait defining the contract for profile service operations.
#[async_trait]
pub trait UserProfileServiceTrait: Send + Sync {
    async fn create_profile(&self, new_profile: NewUserProfile) -> Result<UserProfile>;
    async fn update_profile(&self, profile_update: UserProfileUpdate) -> Result<UserProfile>;
    /// Retrieves a profile, failing with `Error::NotFound` when absent.
    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;
}

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{UserProfileChangesetDB, UserProfileDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::user_profiles;
use tracksmart_core::errors::{Error, Result};
use tracksmart_core::profiles::{
    NewUserProfile, UserProfile, UserProfileRepositoryTrait, UserProfileUpdate,
};

pub struct UserProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserProfileRepository { pool, writer }
    }
}

#[async_trait]
impl UserProfileRepositoryTrait for UserProfileRepository {
    async fn create(&self, new_profile: NewUserProfile) -> Result<UserProfile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                let id = new_profile
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = UserProfileDB::from_new(id, new_profile, Utc::now().naive_utc());

                let stored = diesel::insert_into(user_profiles::table)
                    .values(&row)
                    .returning(UserProfileDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Stored profile {}", stored.id);
                Ok(UserProfile::try_from(stored)?)
            })
            .await
    }

    async fn update(&self, profile_update: UserProfileUpdate) -> Result<UserProfile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UserProfile> {
                let changes =
                    UserProfileChangesetDB::from_update(&profile_update, Utc::now().naive_utc());
                let updated = diesel::update(user_profiles::table.find(&profile_update.id))
                    .set(&changes)
                    .returning(UserProfileDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::NotFound(format!("Profile {}", profile_update.id)))?;
                Ok(UserProfile::try_from(updated)?)
            })
            .await
    }

    fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let row = user_profiles::table
            .find(user_id)
            .select(UserProfileDB::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(UserProfile::try_from).transpose()?)
    }
}

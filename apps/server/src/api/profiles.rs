use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracksmart_core::profiles::{NewUserProfile, UserProfile};

use crate::{error::ApiResult, main_lib::AppState, models::ProfileUpdateRequest};

async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<NewUserProfile>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let created = state.profile_service.create_profile(profile).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_profile(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.profile_service.get_profile(&user_id)?;
    Ok(Json(profile))
}

async fn update_profile(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProfileUpdateRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state
        .profile_service
        .update_profile(update.into_update(user_id))
        .await?;
    Ok(Json(profile))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", post(create_profile))
        .route("/profiles/{user_id}", get(get_profile).put(update_profile))
}

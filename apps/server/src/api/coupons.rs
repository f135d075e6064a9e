use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracksmart_core::coupons::CouponLedger;

use crate::{error::ApiResult, main_lib::AppState};

/// Today's coupon, issued on first read; `null` for pay-to-eat students.
async fn get_today_coupon(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<CouponLedger>>> {
    let profile = state.profile_service.get_profile(&user_id)?;
    let ledger = state
        .coupon_service
        .get_or_create_today_coupon(&user_id, profile.meal_plan, state.today())
        .await?;
    Ok(Json(ledger))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/{user_id}/coupon", get(get_today_coupon))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracksmart_core::insights::{MonthlySpendingSummary, SpendingInsight};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_spending_insight(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SpendingInsight>> {
    let insight = state.insights_service.get_spending_insight(&user_id)?;
    Ok(Json(insight))
}

async fn get_monthly_summary(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthlySpendingSummary>> {
    let summary = state.insights_service.get_monthly_summary(&user_id)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/insights", get(get_spending_insight))
        .route("/users/{user_id}/summary", get(get_monthly_summary))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracksmart_core::transactions::Transaction;

use crate::{error::ApiResult, main_lib::AppState, models::RecordTransactionRequest};

async fn list_transactions(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    state.profile_service.get_profile(&user_id)?;
    let transactions = state.transaction_service.list_transactions(&user_id)?;
    Ok(Json(transactions))
}

async fn record_transaction(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordTransactionRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    state.profile_service.get_profile(&user_id)?;
    let transaction = state
        .transaction_service
        .record_transaction(request.into_new_transaction(user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users/{user_id}/transactions",
        get(list_transactions).post(record_transaction),
    )
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracksmart_core::checkout::{Cart, CheckoutQuote, CheckoutReceipt};

use crate::{error::ApiResult, main_lib::AppState};

async fn quote_cart(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(cart): Json<Cart>,
) -> ApiResult<Json<CheckoutQuote>> {
    let profile = state.profile_service.get_profile(&user_id)?;
    let quote = state
        .checkout_service
        .quote(&user_id, profile.meal_plan, &cart)
        .await?;
    Ok(Json(quote))
}

async fn place_order(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(cart): Json<Cart>,
) -> ApiResult<(StatusCode, Json<CheckoutReceipt>)> {
    let profile = state.profile_service.get_profile(&user_id)?;
    let receipt = state
        .checkout_service
        .place_order(&user_id, profile.meal_plan, cart)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/checkout/quote", post(quote_cart))
        .route("/users/{user_id}/checkout", post(place_order))
}

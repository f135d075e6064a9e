use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tracksmart_core::{
    checkout::{CheckoutService, CheckoutServiceTrait},
    coupons::{CouponService, CouponServiceTrait},
    insights::{InsightsService, InsightsServiceTrait},
    profiles::{UserProfileService, UserProfileServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    utils::time_utils::{campus_date_from_utc, Clock, SystemClock},
};
use tracksmart_storage_sqlite::{
    coupons::CouponLedgerRepository, create_pool, init, profiles::UserProfileRepository,
    run_migrations, spawn_writer, transactions::TransactionRepository,
};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub profile_service: Arc<dyn UserProfileServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub coupon_service: Arc<dyn CouponServiceTrait>,
    pub checkout_service: Arc<dyn CheckoutServiceTrait>,
    pub insights_service: Arc<dyn InsightsServiceTrait>,
    pub clock: Arc<dyn Clock>,
    pub timezone: Tz,
}

impl AppState {
    /// Current calendar date in the campus timezone.
    pub fn today(&self) -> NaiveDate {
        campus_date_from_utc(self.clock.now_utc(), self.timezone)
    }
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    build_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Wires repositories and services over the SQLite database at `config.db_path`.
pub async fn build_state_with_clock(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let profile_repository = Arc::new(UserProfileRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let coupon_repository = Arc::new(CouponLedgerRepository::new(pool.clone(), writer));

    let coupon_service: Arc<dyn CouponServiceTrait> =
        Arc::new(CouponService::new(coupon_repository));
    let profile_service = Arc::new(UserProfileService::new(profile_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        clock.clone(),
    ));
    let checkout_service = Arc::new(CheckoutService::new(
        coupon_service.clone(),
        transaction_repository.clone(),
        clock.clone(),
        config.timezone,
    ));
    let insights_service = Arc::new(InsightsService::new(
        profile_repository,
        transaction_repository,
        clock.clone(),
        config.timezone,
    ));
    tracing::info!("Campus timezone: {}", config.timezone);

    Ok(Arc::new(AppState {
        profile_service,
        transaction_service,
        coupon_service,
        checkout_service,
        insights_service,
        clock,
        timezone: config.timezone,
    }))
}

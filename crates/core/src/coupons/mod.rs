//! Daily cafeteria coupon module - ledger arithmetic, store, and service.

mod coupon_ledger;
mod coupons_errors;
mod coupons_model;
mod coupons_service;
mod coupons_traits;
mod memory_store;

#[cfg(test)]
mod coupons_service_tests;

pub use coupon_ledger::{draw_down, issue_coupon};
pub use coupons_errors::CouponError;
pub use coupons_model::{CouponKey, CouponLedger, DrawDown};
pub use coupons_service::CouponService;
pub use coupons_traits::{CouponServiceTrait, CouponStoreTrait};
pub use memory_store::InMemoryCouponStore;

//! Checkout module - prices carts and records one purchase per vendor.

mod checkout_model;
mod checkout_service;
mod checkout_traits;


pub use checkout_model::{Cart, CartLine, CheckoutQuote, CheckoutReceipt};
pub use checkout_service::CheckoutService;
pub use checkout_traits::CheckoutServiceTrait;

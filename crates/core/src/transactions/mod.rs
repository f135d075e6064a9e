//! Transactions module - purchase log models, services, and traits.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod transactions_model_tests;

pub use transactions_model::{NewTransaction, OrderItem, OrderStatus, Transaction, VendorCategory};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};

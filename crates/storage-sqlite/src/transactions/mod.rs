//! SQLite storage implementation for the purchase log.

mod model;
mod repository;

pub use model::TransactionDB;
pub use repository::TransactionRepository;

//! SQLite storage implementation for student profiles.

mod model;
mod repository;

pub use model::UserProfileDB;
pub use repository::UserProfileRepository;

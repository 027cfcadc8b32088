pub mod error;
pub mod user_repo;
pub mod user_store;

pub mod citizenship_repository;
pub mod customer_repository;
pub mod history_repository;
pub mod user_repository;

pub use citizenship_repository::*;
pub use customer_repository::*;
pub use history_repository::*;
pub use user_repository::*;

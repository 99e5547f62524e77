pub mod auth_service;
pub mod citizenship_service;
pub mod customer_service;
pub mod history_service;

pub use auth_service::*;
pub use citizenship_service::*;
pub use customer_service::*;
pub use history_service::*;

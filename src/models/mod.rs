pub mod citizenship;
pub mod common;
pub mod customer;
pub mod history;
pub mod user;

pub use citizenship::*;
pub use common::*;
pub use customer::*;
pub use history::*;
pub use user::*;

pub mod citizenships;
pub mod customers;
pub mod histories;
pub mod users;

pub use citizenships as citizenship_entity;
pub use customers as customer_entity;
pub use customers::Gender;
pub use histories as history_entity;
pub use users as user_entity;

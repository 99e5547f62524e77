pub mod jwt;
pub mod params;
pub mod password;

pub use jwt::*;
pub use params::*;
pub use password::*;

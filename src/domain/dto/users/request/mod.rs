pub mod auth_request;
pub mod account_request;

pub use auth_request::*;
pub use account_request::*;

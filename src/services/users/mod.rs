//! 계정 서비스 모듈

pub mod credential_service;
pub mod user_service;

pub use credential_service::*;
pub use user_service::*;

//! 인증 서비스 모듈
//!
//! - [`token_service`] - JWT 발급/검증
//! - [`session_service`] - 로그인, 로그아웃, 갱신, 비밀번호 변경

pub mod token_service;
pub mod session_service;

pub use token_service::*;
pub use session_service::*;

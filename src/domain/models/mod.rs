//! 도메인 모델
//!
//! 저장되지 않는 값 객체들입니다.
//!
//! - [`token`] - JWT 클레임과 토큰 쌍
//! - [`auth`] - 인증된 요청 주체

pub mod auth;
pub mod token;

pub use auth::*;
pub use token::*;

//! 배송 연동 모듈
//!
//! - [`token_client`] - 캐시된 Bearer 토큰과 단일 재인증
//! - [`shiprocket_client`] - 주문 생성/조회 API

pub mod token_client;
pub mod shiprocket_client;

pub use token_client::*;
pub use shiprocket_client::*;

//! 계정 엔티티 모듈
//!
//! [`User`](user::User) 엔티티와 비밀번호 해시 타입을 제공합니다.

pub mod user;

pub use user::*;

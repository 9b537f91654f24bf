//! # Domain Entities
//!
//! MongoDB에 저장되는 영속 엔티티들입니다.
//! 민감 정보(비밀번호 해시, 리프레시 토큰)를 포함하므로
//! 절대 응답으로 직접 직렬화하지 않고 DTO로 변환해서 내보냅니다.

pub mod users;

pub use users::*;

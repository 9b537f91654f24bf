//! # Data Transfer Objects
//!
//! HTTP 요청/응답 계약입니다. 엔티티는 항상 여기 정의된 응답 타입으로 변환된 뒤에 나갑니다.

pub mod api_response;
pub mod users;

pub use api_response::*;
pub use users::*;

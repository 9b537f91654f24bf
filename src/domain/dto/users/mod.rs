//! # User Data Transfer Objects Module
//!
//! 계정 관련 API의 요청/응답 데이터 구조입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── auth_request.rs      # 로그인, 비밀번호 변경
//! │   └── account_request.rs   # 회원가입 폼, 계정 정보 수정
//! └── response/
//!     └── user_response.rs     # 비밀번호/토큰이 제거된 프로필
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

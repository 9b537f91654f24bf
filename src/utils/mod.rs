//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 요청 문자열 정리, 식별자 정규화, Bearer 헤더 파싱
//! - [`jwt_payload`] - 서명 검증 없는 JWT 페이로드 읽기
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::validate_required_string;
//! use crate::utils::jwt_payload::unverified_expiry;
//!
//! let clean_name = validate_required_string("  John  ", "name")?;
//! let exp = unverified_expiry(&token);
//! ```

pub mod string_utils;
pub mod jwt_payload;

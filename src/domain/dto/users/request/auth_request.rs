//! 인증 요청 DTO
//!
//! 로그인과 비밀번호 변경 요청 본문을 매핑합니다.
use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 로그인 요청 구조체
///
/// 사용자명 또는 이메일 중 하나만 있으면 됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// 조회에 사용할 식별자 (사용자명 우선)
    pub fn identity(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}

/// 비밀번호 변경 요청 구조체
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(alias = "oldPassword")]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,

    pub confirm_password: String,
}

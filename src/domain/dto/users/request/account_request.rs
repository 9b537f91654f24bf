//! 계정 생성/수정 요청 DTO

use serde::Deserialize;
use validator::Validate;
use crate::errors::AppError;
use crate::utils::string_utils::deserialize_optional_string;

/// 업로드된 파일 (multipart 파트 하나)
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// 회원가입 multipart 폼
///
/// 텍스트 필드는 [`RegisterForm::set_field`]로, 파일은 직접 채워집니다.
#[derive(Debug, Default, Validate)]
pub struct RegisterForm {
    pub full_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub username: String,

    pub password: String,

    pub avatar: Option<UploadedFile>,

    pub cover_image: Option<UploadedFile>,
}

impl RegisterForm {
    /// 텍스트 파트를 필드에 기록합니다. 알 수 없는 이름이면 `false`.
    ///
    /// 비밀번호를 제외한 값은 앞뒤 공백을 제거합니다.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "fullName" => self.full_name = value.trim().to_string(),
            "email" => self.email = value.trim().to_string(),
            "username" => self.username = value.trim().to_string(),
            "password" => self.password = value,
            _ => return false,
        }
        true
    }

    /// 필수 텍스트 필드 확인 후 형식 검증
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        let fields = [&self.full_name, &self.email, &self.username, &self.password];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::ValidationError("All fields are required".to_string()));
        }

        self.validate()?;
        Ok(())
    }
}

/// 계정 정보 수정 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

impl UpdateAccountRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterForm {
        let mut form = RegisterForm::default();
        form.set_field("fullName", " Alice ".into());
        form.set_field("email", "alice@x.com".into());
        form.set_field("username", "alice".into());
        form.set_field("password", "pw123".into());
        form
    }

    #[test]
    fn test_set_field_ignores_unknown_names() {
        let mut form = RegisterForm::default();
        assert!(!form.set_field("role", "admin".into()));
        assert!(form.set_field("username", "  bob ".into()));
        assert_eq!(form.username, "bob");
    }

    #[test]
    fn test_complete_form_passes() {
        let form = filled();
        assert_eq!(form.full_name, "Alice");
        assert!(form.ensure_complete().is_ok());
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut form = filled();
        form.set_field("fullName", "   ".into());

        match form.ensure_complete() {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, "All fields are required"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let mut form = filled();
        form.set_field("email", "not-an-email".into());
        assert!(matches!(form.ensure_complete(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_update_request_emptiness() {
        let req: UpdateAccountRequest = serde_json::from_str(r#"{"fullName":"  "}"#).unwrap();
        assert!(req.is_empty());

        let req: UpdateAccountRequest = serde_json::from_str(r#"{"email":"new@x.com"}"#).unwrap();
        assert!(!req.is_empty());
        assert!(req.validate().is_ok());
    }
}

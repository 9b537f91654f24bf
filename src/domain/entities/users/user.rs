//! User Entity Implementation
//!
//! 고객/판매자 계정의 영속 모델입니다.
//! 비밀번호는 [`PasswordHash`] 타입으로만 보관되며, 평문은 엔티티에 들어올 수 없습니다.

use std::fmt;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;
use crate::utils::string_utils::{normalize_identity, validate_required_string};

/// 계정 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Seller,
    Admin,
    Superadmin,
}

/// bcrypt로 해싱된 비밀번호
///
/// 평문을 해싱하거나 저장소에서 읽어온 해시로만 생성할 수 있습니다.
/// 이미 해싱된 값을 다시 해싱하는 경로가 타입 수준에서 존재하지 않습니다.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// 평문 비밀번호를 솔트가 포함된 bcrypt 해시로 변환합니다.
    pub fn from_plaintext(plaintext: &str, cost: u32) -> Result<Self, AppError> {
        bcrypt::hash(plaintext, cost)
            .map(Self)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }

    /// 후보 비밀번호가 해시와 일치하는지 확인합니다.
    ///
    /// 해시 형식이 손상된 경우에도 `false`를 반환합니다.
    pub fn matches(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.0).unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// 신규 계정 생성에 필요한 프로필 정보
///
/// [`NewAccount::new`]를 통과한 값은 공백 제거 및 소문자 정규화가 끝난 상태입니다.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
}

impl NewAccount {
    pub fn new(
        username: &str,
        email: &str,
        full_name: &str,
        avatar: String,
        cover_image: Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            username: normalize_identity(&validate_required_string(username, "username")?),
            email: normalize_identity(&validate_required_string(email, "email")?),
            full_name: validate_required_string(full_name, "fullName")?,
            avatar,
            cover_image,
        })
    }
}

/// 계정 엔티티 (`users` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자명 (unique, 소문자)
    pub username: String,
    /// 이메일 (unique, 소문자)
    pub email: String,
    pub full_name: String,
    /// 아바타 이미지 URL
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub password: PasswordHash,
    /// 현재 유효한 단 하나의 리프레시 토큰
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// 판매자 승인 여부
    #[serde(default)]
    pub approved: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 고객 계정 생성
    pub fn new_customer(account: NewAccount, password: PasswordHash) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: account.username,
            email: account.email,
            full_name: account.full_name,
            avatar: account.avatar,
            cover_image: account.cover_image,
            password,
            refresh_token: None,
            role: Role::Customer,
            approved: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 저장된 리프레시 토큰과 바이트 단위로 일치하는지 확인
    pub fn holds_refresh_token(&self, presented: &str) -> bool {
        self.refresh_token.as_deref() == Some(presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> NewAccount {
        NewAccount::new("  Alice ", " Alice@X.com", " Alice Liddell ", "https://cdn/a.png".into(), None).unwrap()
    }

    #[test]
    fn test_new_account_normalizes_identity() {
        let account = account();
        assert_eq!(account.username, "alice");
        assert_eq!(account.email, "alice@x.com");
        assert_eq!(account.full_name, "Alice Liddell");
    }

    #[test]
    fn test_new_account_rejects_blank_fields() {
        let result = NewAccount::new("   ", "a@x.com", "A", "url".into(), None);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_password_hash_never_equals_plaintext() {
        let hash = PasswordHash::from_plaintext("pw123", 4).unwrap();
        assert_ne!(hash.as_str(), "pw123");
        assert!(hash.matches("pw123"));
        assert!(!hash.matches("pw124"));
        assert_eq!(format!("{:?}", hash), "PasswordHash(<redacted>)");
    }

    #[test]
    fn test_new_customer_defaults() {
        let user = User::new_customer(account(), PasswordHash::from_plaintext("pw", 4).unwrap());
        assert_eq!(user.role, Role::Customer);
        assert!(!user.approved);
        assert!(user.refresh_token.is_none());
        assert!(user.id_string().is_none());
    }

    #[test]
    fn test_holds_refresh_token_is_exact() {
        let mut user = User::new_customer(account(), PasswordHash::from_plaintext("pw", 4).unwrap());
        assert!(!user.holds_refresh_token("abc"));
        user.refresh_token = Some("abc".to_string());
        assert!(user.holds_refresh_token("abc"));
        assert!(!user.holds_refresh_token("abc "));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"superadmin\"");
    }
}

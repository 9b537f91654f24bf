//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 발급과 검증을 담당합니다.
//! 두 토큰은 서로 다른 비밀키와 유효 기간을 사용하므로,
//! 한쪽 비밀키가 유출되어도 다른 종류의 토큰을 위조할 수 없습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;
use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{AccessClaims, RefreshClaims, TokenPair};
use crate::errors::AppError;
use crate::utils::jwt_payload::unverified_expiry;

/// 토큰 검증 실패 사유
///
/// 만료는 재로그인이 필요하다는 신호이고, 나머지는 모두 위조/손상으로 취급합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// 서명 비밀키와 유효 기간
#[derive(Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub access_ttl: Duration,
    pub refresh_secret: String,
    pub refresh_ttl: Duration,
}

impl TokenSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            access_secret: JwtConfig::access_secret()?,
            access_ttl: JwtConfig::access_expiry(),
            refresh_secret: JwtConfig::refresh_secret()?,
            refresh_ttl: JwtConfig::refresh_expiry(),
        })
    }
}

pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(settings: TokenSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access_encoding: EncodingKey::from_secret(settings.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(settings.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(settings.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(settings.refresh_secret.as_bytes()),
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
            validation,
        }
    }

    fn user_id(user: &User) -> Result<String, AppError> {
        user.id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
    }

    fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<i64, AppError> {
        now.checked_add_signed(ttl)
            .map(|at| at.timestamp())
            .ok_or_else(|| AppError::InternalError("토큰 만료 시간이 표현 범위를 벗어났습니다".to_string()))
    }

    fn sign<T: Serialize>(claims: &T, key: &EncodingKey, kind: &str) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|e| AppError::InternalError(format!("{} 토큰 생성 실패: {}", kind, e)))
    }

    /// 액세스 토큰 발급 `{_id, email, username, fullName}`
    pub fn issue_access_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            id: Self::user_id(user)?,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: Self::expiry(now, self.access_ttl)?,
        };

        Self::sign(&claims, &self.access_encoding, "액세스")
    }

    /// 리프레시 토큰 발급 `{_id, email}`
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            id: Self::user_id(user)?,
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: Self::expiry(now, self.refresh_ttl)?,
        };

        Self::sign(&claims, &self.refresh_encoding, "리프레시")
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user)?,
        })
    }

    fn verify<T: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<T, TokenError> {
        decode::<T>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify(token, &self.access_decoding)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.verify(token, &self.refresh_decoding)
    }

    /// 서명 확인 없이 계산한 남은 수명(초). 음수면 이미 만료.
    ///
    /// 블랙리스트 TTL 계산 전용입니다.
    pub fn remaining_lifetime(&self, token: &str) -> Option<i64> {
        unverified_expiry(token).map(|exp| exp - Utc::now().timestamp())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::entities::users::user::{NewAccount, PasswordHash};
    use mongodb::bson::oid::ObjectId;

    pub(crate) fn settings(access_ttl: Duration, refresh_ttl: Duration) -> TokenSettings {
        TokenSettings {
            access_secret: "test-access-secret".to_string(),
            access_ttl,
            refresh_secret: "test-refresh-secret".to_string(),
            refresh_ttl,
        }
    }

    fn service() -> TokenService {
        TokenService::new(settings(Duration::minutes(15), Duration::days(10)))
    }

    fn user() -> User {
        let account = NewAccount::new("alice", "alice@x.com", "Alice", "url".into(), None).unwrap();
        let mut user = User::new_customer(account, PasswordHash::from_plaintext("pw", 4).unwrap());
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_pair_verifies_against_respective_secrets() {
        let service = service();
        let user = user();
        let pair = service.issue_pair(&user).unwrap();

        let access = service.verify_access(&pair.access_token).unwrap();
        let refresh = service.verify_refresh(&pair.refresh_token).unwrap();

        assert_eq!(access.id, user.id_string().unwrap());
        assert_eq!(access.id, refresh.id);
        assert_eq!(access.username, "alice");
        assert_eq!(access.full_name, "Alice");
    }

    #[test]
    fn test_same_second_issuance_yields_distinct_tokens() {
        let service = service();
        let user = user();
        let first = service.issue_pair(&user).unwrap();
        let second = service.issue_pair(&user).unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_ne!(first.access_token, second.access_token);
        assert_ne!(
            service.verify_refresh(&first.refresh_token).unwrap().jti,
            service.verify_refresh(&second.refresh_token).unwrap().jti
        );
    }

    #[test]
    fn test_expiry_beyond_calendar_range_is_an_error() {
        let far = Duration::days(99_999_999_999);
        let service = TokenService::new(settings(far, far));
        assert!(matches!(service.issue_access_token(&user()), Err(AppError::InternalError(_))));
        assert!(matches!(service.issue_refresh_token(&user()), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let service = service();
        let pair = service.issue_pair(&user()).unwrap();

        assert_eq!(service.verify_refresh(&pair.access_token), Err(TokenError::Invalid));
        assert_eq!(service.verify_access(&pair.refresh_token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let service = TokenService::new(settings(Duration::seconds(-120), Duration::seconds(-120)));
        let pair = service.issue_pair(&user()).unwrap();

        assert_eq!(service.verify_access(&pair.access_token), Err(TokenError::Expired));
        assert_eq!(service.verify_refresh(&pair.refresh_token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let service = service();
        assert_eq!(service.verify_refresh("garbage"), Err(TokenError::Invalid));
        assert_eq!(service.verify_access(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_remaining_lifetime() {
        let service = service();
        let token = service.issue_access_token(&user()).unwrap();
        let remaining = service.remaining_lifetime(&token).unwrap();
        assert!((14 * 60..=15 * 60).contains(&remaining));

        let expired = TokenService::new(settings(Duration::seconds(-60), Duration::days(1)))
            .issue_access_token(&user())
            .unwrap();
        assert!(service.remaining_lifetime(&expired).unwrap() <= 0);
        assert_eq!(service.remaining_lifetime("garbage"), None);
    }

    #[test]
    fn test_user_without_id_cannot_be_issued() {
        let mut user = user();
        user.id = None;
        assert!(matches!(service().issue_access_token(&user), Err(AppError::InternalError(_))));
    }
}

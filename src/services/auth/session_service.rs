//! # 세션 관리 서비스
//!
//! 로그인, 로그아웃, 액세스 토큰 갱신, 비밀번호 변경 흐름을 조율합니다.
//!
//! ```text
//! Anonymous ──login──▶ Authenticated ──logout──▶ LoggedOut
//!                        │      ▲
//!                        └──────┘ refresh
//! ```
//!
//! 계정당 유효한 리프레시 토큰은 하나뿐입니다. 새 로그인은 이전 세션의
//! 리프레시 토큰을 덮어쓰며, 동시 로그인 경쟁은 마지막 쓰기가 이깁니다.
//! 리프레시 흐름에서는 리프레시 토큰을 교체하지 않습니다.

use std::sync::Arc;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::errors::AppError;
use crate::repositories::tokens::RevocationLedger;
use crate::services::auth::token_service::{TokenError, TokenService};
use crate::services::users::credential_service::CredentialService;
use crate::utils::string_utils::normalize_identity;

/// 로그인 성공 결과
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: UserResponse,
    pub tokens: TokenPair,
}

/// 액세스 토큰 갱신 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// 현재 액세스 토큰이 아직 유효하여 아무것도 발급하지 않음
    StillValid,
    /// 새 액세스 토큰 발급
    Renewed { access_token: String },
}

pub struct SessionService {
    credentials: Arc<CredentialService>,
    tokens: Arc<TokenService>,
    ledger: Arc<dyn RevocationLedger>,
}

impl SessionService {
    pub fn new(
        credentials: Arc<CredentialService>,
        tokens: Arc<TokenService>,
        ledger: Arc<dyn RevocationLedger>,
    ) -> Self {
        Self { credentials, tokens, ledger }
    }

    /// 사용자명 또는 이메일과 비밀번호로 로그인합니다.
    ///
    /// 성공하면 새 토큰 쌍을 발급하고 리프레시 토큰을 계정에 기록합니다.
    pub async fn login(&self, identity: Option<&str>, password: &str) -> Result<LoginOutcome, AppError> {
        let identity = identity
            .map(normalize_identity)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::ValidationError("username or email is required".to_string()))?;

        let user = self
            .credentials
            .find_by_identity(&identity)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        if !user.password.matches(password) {
            log::warn!("로그인 실패: 비밀번호 불일치 ({})", user.username);
            return Err(AppError::AuthenticationError("Invalid user credentials".to_string()));
        }

        let tokens = self.tokens.issue_pair(&user)?;
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        self.credentials
            .set_refresh_token(&user_id, Some(&tokens.refresh_token))
            .await?;

        log::info!("로그인 성공: {}", user.username);

        Ok(LoginOutcome {
            user: UserResponse::from(user),
            tokens,
        })
    }

    /// 현재 액세스 토큰을 남은 수명만큼 블랙리스트에 올리고 리프레시 토큰을 지웁니다.
    pub async fn logout(&self, principal: &AuthenticatedUser, access_token: Option<&str>) -> Result<(), AppError> {
        if let Some(token) = access_token {
            match self.tokens.remaining_lifetime(token) {
                Some(ttl) => self.ledger.blacklist(token, ttl).await?,
                None => log::debug!("만료 시간을 읽을 수 없는 액세스 토큰은 블랙리스트에 올리지 않습니다"),
            }
        }

        self.credentials
            .set_refresh_token(&principal.user_id, None)
            .await?;

        log::info!("로그아웃: {}", principal.username);
        Ok(())
    }

    /// 리프레시 토큰으로 액세스 토큰을 갱신합니다.
    ///
    /// 제시된 액세스 토큰이 같은 사용자의 것으로 아직 유효하면 새로 발급하지 않습니다.
    pub async fn refresh(
        &self,
        refresh_token: Option<&str>,
        access_token: Option<&str>,
    ) -> Result<RefreshOutcome, AppError> {
        let incoming = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Unauthorized Request".to_string()))?;

        let claims = match self.tokens.verify_refresh(incoming) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => {
                log::warn!("만료된 리프레시 토큰으로 갱신 시도");
                return Err(AppError::AuthenticationError(
                    "Refresh token expired. Please log in again.".to_string(),
                ));
            }
            Err(TokenError::Invalid) => {
                log::warn!("서명 검증에 실패한 리프레시 토큰으로 갱신 시도");
                return Err(AppError::AuthenticationError("Invalid refresh token".to_string()));
            }
        };

        let user = self
            .credentials
            .find_by_id(&claims.id)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("Invalid refresh token".to_string()))?;

        if !user.holds_refresh_token(incoming) {
            log::warn!("저장된 값과 다른 리프레시 토큰 ({})", user.username);
            return Err(AppError::AuthenticationError(
                "Refresh token is expired or does not match".to_string(),
            ));
        }

        if let Some(token) = access_token {
            let same_user = self
                .tokens
                .verify_access(token)
                .is_ok_and(|access| access.id == claims.id);
            if same_user && !self.ledger.is_blacklisted(token).await? {
                return Ok(RefreshOutcome::StillValid);
            }
        }

        let access_token = self.tokens.issue_access_token(&user)?;
        log::info!("액세스 토큰 재발급: {}", user.username);

        Ok(RefreshOutcome::Renewed { access_token })
    }

    /// 현재 비밀번호 확인 후 비밀번호 해시만 교체합니다. 토큰은 새로 발급하지 않습니다.
    pub async fn change_password(
        &self,
        user_id: &str,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), AppError> {
        if new != confirm {
            return Err(AppError::ValidationError(
                "New password and confirm password do not match".to_string(),
            ));
        }

        if !self.credentials.verify_password(user_id, current).await? {
            return Err(AppError::AuthenticationError("Invalid password".to_string()));
        }

        self.credentials.set_password(user_id, new).await?;
        log::info!("비밀번호 변경 완료: {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::entities::users::user::NewAccount;
    use crate::repositories::tokens::InMemoryRevocationLedger;
    use crate::repositories::users::InMemoryUserStore;
    use crate::services::auth::token_service::tests::settings;

    struct Fixture {
        session: SessionService,
        credentials: Arc<CredentialService>,
        tokens: Arc<TokenService>,
        ledger: Arc<InMemoryRevocationLedger>,
    }

    fn fixture_with(access_ttl: Duration, refresh_ttl: Duration) -> Fixture {
        let credentials = Arc::new(CredentialService::new(Arc::new(InMemoryUserStore::new()), 4));
        let tokens = Arc::new(TokenService::new(settings(access_ttl, refresh_ttl)));
        let ledger = Arc::new(InMemoryRevocationLedger::new());

        Fixture {
            session: SessionService::new(credentials.clone(), tokens.clone(), ledger.clone()),
            credentials,
            tokens,
            ledger,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Duration::minutes(15), Duration::days(10))
    }

    async fn register(f: &Fixture) -> String {
        let account = NewAccount::new("alice", "alice@x.com", "Alice", "url".into(), None).unwrap();
        f.credentials.create(account, "pw123").await.unwrap().id_string().unwrap()
    }

    fn principal(f: &Fixture, token: &str) -> AuthenticatedUser {
        AuthenticatedUser::from_claims(f.tokens.verify_access(token).unwrap(), token.to_string())
    }

    #[actix_web::test]
    async fn test_login_issues_tokens_for_same_user() {
        let f = fixture();
        let id = register(&f).await;

        let outcome = f.session.login(Some("Alice"), "pw123").await.unwrap();

        let access = f.tokens.verify_access(&outcome.tokens.access_token).unwrap();
        let refresh = f.tokens.verify_refresh(&outcome.tokens.refresh_token).unwrap();
        assert_eq!(access.id, id);
        assert_eq!(refresh.id, id);
        assert_eq!(outcome.user.username, "alice");

        let stored = f.credentials.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.holds_refresh_token(&outcome.tokens.refresh_token));
    }

    #[actix_web::test]
    async fn test_login_by_email() {
        let f = fixture();
        register(&f).await;
        assert!(f.session.login(Some("alice@x.com"), "pw123").await.is_ok());
    }

    #[actix_web::test]
    async fn test_login_failures() {
        let f = fixture();
        register(&f).await;

        assert!(matches!(f.session.login(None, "pw123").await, Err(AppError::ValidationError(_))));
        assert!(matches!(f.session.login(Some("  "), "pw123").await, Err(AppError::ValidationError(_))));
        assert!(matches!(f.session.login(Some("bob"), "pw123").await, Err(AppError::NotFound(_))));
        assert!(matches!(
            f.session.login(Some("alice"), "wrong").await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_second_login_invalidates_first_refresh_token() {
        let f = fixture();
        register(&f).await;

        let first = f.session.login(Some("alice"), "pw123").await.unwrap();
        let second = f.session.login(Some("alice"), "pw123").await.unwrap();
        assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);

        let err = f.session.refresh(Some(&first.tokens.refresh_token), None).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        assert!(f.session.refresh(Some(&second.tokens.refresh_token), None).await.is_ok());
    }

    #[actix_web::test]
    async fn test_logout_blacklists_and_clears_refresh_token() {
        let f = fixture();
        let id = register(&f).await;
        let outcome = f.session.login(Some("alice"), "pw123").await.unwrap();
        let access = outcome.tokens.access_token.clone();

        f.session.logout(&principal(&f, &access), Some(&access)).await.unwrap();

        assert!(f.ledger.is_blacklisted(&access).await.unwrap());
        assert!(f.credentials.find_by_id(&id).await.unwrap().unwrap().refresh_token.is_none());

        // 반복 로그아웃은 무해
        f.session.logout(&principal(&f, &access), None).await.unwrap();

        let err = f.session.refresh(Some(&outcome.tokens.refresh_token), None).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[actix_web::test]
    async fn test_refresh_renews_revoked_access_token() {
        let f = fixture();
        register(&f).await;

        let first = f.session.login(Some("alice"), "pw123").await.unwrap();
        let revoked = first.tokens.access_token.clone();
        f.session.logout(&principal(&f, &revoked), Some(&revoked)).await.unwrap();
        assert!(f.ledger.is_blacklisted(&revoked).await.unwrap());

        let second = f.session.login(Some("alice"), "pw123").await.unwrap();
        let outcome = f
            .session
            .refresh(Some(&second.tokens.refresh_token), Some(&revoked))
            .await
            .unwrap();

        match outcome {
            RefreshOutcome::Renewed { access_token } => {
                assert_ne!(access_token, revoked);
                assert!(f.tokens.verify_access(&access_token).is_ok());
                assert!(!f.ledger.is_blacklisted(&access_token).await.unwrap());
            }
            RefreshOutcome::StillValid => panic!("revoked access token reported as still valid"),
        }
    }

    #[actix_web::test]
    async fn test_logout_with_expired_access_token_skips_blacklist() {
        let f = fixture_with(Duration::seconds(-60), Duration::days(1));
        register(&f).await;
        let outcome = f.session.login(Some("alice"), "pw123").await.unwrap();
        let access = outcome.tokens.access_token;

        let claims = crate::utils::jwt_payload::decode_unverified(&access).unwrap();
        let principal = AuthenticatedUser::from_claims(claims, access.clone());
        f.session.logout(&principal, Some(&access)).await.unwrap();

        assert!(!f.ledger.is_blacklisted(&access).await.unwrap());
    }

    #[actix_web::test]
    async fn test_refresh_requires_cookie() {
        let f = fixture();
        match f.session.refresh(None, None).await {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Unauthorized Request"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_refresh_distinguishes_expired_from_invalid() {
        let f = fixture_with(Duration::minutes(15), Duration::seconds(-60));
        register(&f).await;
        let outcome = f.session.login(Some("alice"), "pw123").await.unwrap();

        match f.session.refresh(Some(&outcome.tokens.refresh_token), None).await {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("expired")),
            other => panic!("unexpected: {:?}", other),
        }

        match f.session.refresh(Some("not.a.token"), None).await {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Invalid refresh token"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_refresh_short_circuits_on_valid_access_token() {
        let f = fixture();
        register(&f).await;
        let outcome = f.session.login(Some("alice"), "pw123").await.unwrap();

        let result = f
            .session
            .refresh(Some(&outcome.tokens.refresh_token), Some(&outcome.tokens.access_token))
            .await
            .unwrap();
        assert_eq!(result, RefreshOutcome::StillValid);
    }

    #[actix_web::test]
    async fn test_refresh_renews_missing_or_broken_access_token() {
        let f = fixture();
        let id = register(&f).await;
        let outcome = f.session.login(Some("alice"), "pw123").await.unwrap();

        for access in [None, Some("garbage")] {
            match f.session.refresh(Some(&outcome.tokens.refresh_token), access).await.unwrap() {
                RefreshOutcome::Renewed { access_token } => {
                    assert_eq!(f.tokens.verify_access(&access_token).unwrap().id, id);
                }
                RefreshOutcome::StillValid => panic!("expected a new access token"),
            }
        }

        // 리프레시 토큰은 교체되지 않음
        let stored = f.credentials.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.holds_refresh_token(&outcome.tokens.refresh_token));
    }

    #[actix_web::test]
    async fn test_change_password() {
        let f = fixture();
        let id = register(&f).await;

        assert!(matches!(
            f.session.change_password(&id, "pw123", "a", "b").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            f.session.change_password(&id, "wrong", "next", "next").await,
            Err(AppError::AuthenticationError(_))
        ));

        f.session.change_password(&id, "pw123", "next", "next").await.unwrap();
        assert!(f.session.login(Some("alice"), "next").await.is_ok());
        assert!(f.session.login(Some("alice"), "pw123").await.is_err());
    }
}

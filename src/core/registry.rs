//! # 서비스 레지스트리
//!
//! 시작 시 한 번 조립되어 `web::Data`로 모든 핸들러와 미들웨어에 공유됩니다.
//! 각 구성 요소는 생성자 인자로 의존성을 받으며, 전역 싱글톤은 없습니다.
//!
//! ```text
//! Database ─▶ MongoUserRepository ─▶ CredentialService ─┬─▶ SessionService
//! RedisClient ─▶ RedisRevocationLedger ─────────────────┤
//! TokenSettings ─▶ TokenService ────────────────────────┘
//! CredentialService + MediaStore ─▶ UserService
//! ShiprocketAuthenticator ─▶ ExternalTokenClient ─▶ ShiprocketClient
//! ```

use std::sync::Arc;
use reqwest::Client;
use crate::caching::redis::RedisClient;
use crate::config::{MediaConfig, PasswordConfig, ShiprocketConfig};
use crate::db::Database;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::tokens::{InMemoryRevocationLedger, RedisRevocationLedger, RevocationLedger};
use crate::repositories::users::{InMemoryUserStore, MongoUserRepository, UserStore};
use crate::services::auth::{SessionService, TokenService, TokenSettings};
use crate::services::media::{CloudinaryUploader, InMemoryMediaStore, MediaStore};
use crate::services::shipping::{ExternalTokenClient, ShiprocketAuthenticator, ShiprocketClient, TokenSource};
use crate::services::users::{CredentialService, UserService};

#[derive(Clone)]
pub struct ServiceRegistry {
    pub users: Arc<UserService>,
    pub sessions: Arc<SessionService>,
    pub credentials: Arc<CredentialService>,
    pub tokens: Arc<TokenService>,
    pub ledger: Arc<dyn RevocationLedger>,
    pub shipping: Arc<ShiprocketClient>,
}

impl ServiceRegistry {
    /// 저장소 구현을 받아 서비스 그래프를 조립합니다.
    pub fn assemble(
        settings: TokenSettings,
        bcrypt_cost: u32,
        user_store: Arc<dyn UserStore>,
        ledger: Arc<dyn RevocationLedger>,
        media: Arc<dyn MediaStore>,
        shipping: Arc<ShiprocketClient>,
    ) -> Self {
        let credentials = Arc::new(CredentialService::new(user_store, bcrypt_cost));
        let tokens = Arc::new(TokenService::new(settings));
        let sessions = Arc::new(SessionService::new(credentials.clone(), tokens.clone(), ledger.clone()));
        let users = Arc::new(UserService::new(credentials.clone(), media));

        Self { users, sessions, credentials, tokens, ledger, shipping }
    }

    /// 운영 구성: MongoDB, Redis, Cloudinary, Shiprocket
    pub async fn initialize(database: Arc<Database>, redis: Arc<RedisClient>) -> Result<Self, AppError> {
        log::info!("🔧 서비스 초기화 시작");

        let settings = TokenSettings::from_env()?;

        let user_repo = MongoUserRepository::new(database);
        user_repo.create_indexes().await?;
        log::info!("  ✓ UserStore (MongoDB)");

        let ledger = RedisRevocationLedger::new(redis);
        log::info!("  ✓ RevocationLedger (Redis)");

        let http = Client::builder()
            .timeout(ShiprocketConfig::timeout())
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let media = CloudinaryUploader::new(http.clone(), MediaConfig::cloud_name(), MediaConfig::upload_preset());
        log::info!("  ✓ MediaStore (Cloudinary)");

        let base_url = ShiprocketConfig::api_base();
        let authenticator = ShiprocketAuthenticator::new(
            http.clone(),
            base_url.clone(),
            ShiprocketConfig::email(),
            ShiprocketConfig::password(),
        );
        let shipping = ShiprocketClient::new(
            http,
            base_url,
            Arc::new(ExternalTokenClient::new(Arc::new(authenticator))),
        );
        log::info!("  ✓ ShiprocketClient (timeout {:?})", ShiprocketConfig::timeout());

        let registry = Self::assemble(
            settings,
            PasswordConfig::bcrypt_cost(),
            Arc::new(user_repo),
            Arc::new(ledger),
            Arc::new(media),
            Arc::new(shipping),
        );

        log::info!("✅ 서비스 초기화 완료");
        Ok(registry)
    }

    /// 메모리 저장소 구성. 외부 배송 API 토큰은 주어진 공급자에서 받습니다.
    pub fn in_memory(settings: TokenSettings, token_source: Arc<dyn TokenSource>, shipping_base: &str) -> Self {
        let shipping = ShiprocketClient::new(
            Client::new(),
            shipping_base.trim_end_matches('/').to_string(),
            Arc::new(ExternalTokenClient::new(token_source)),
        );

        Self::assemble(
            settings,
            4,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryRevocationLedger::new()),
            Arc::new(InMemoryMediaStore::new()),
            Arc::new(shipping),
        )
    }
}

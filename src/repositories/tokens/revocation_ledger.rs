//! # 액세스 토큰 블랙리스트
//!
//! 로그아웃된 액세스 토큰을 원래 만료 시점까지만 기록합니다.
//! 엔트리는 TTL로 자동 소멸하므로 별도 정리 작업이 없습니다.
//!
//! ## Redis 키 구조
//!
//! ```text
//! bl_{access_token} = "1"   EX {토큰의 남은 수명(초)}
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::errors::AppError;

#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// 토큰을 `ttl_secs`초 동안 블랙리스트에 올립니다.
    ///
    /// `ttl_secs <= 0`이면 이미 만료된 토큰이므로 아무것도 하지 않습니다.
    async fn blacklist(&self, token: &str, ttl_secs: i64) -> Result<(), AppError>;

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError>;
}

pub(crate) fn blacklist_key(token: &str) -> String {
    format!("bl_{}", token)
}

/// Redis 기반 블랙리스트
pub struct RedisRevocationLedger {
    redis: Arc<RedisClient>,
}

impl RedisRevocationLedger {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RevocationLedger for RedisRevocationLedger {
    async fn blacklist(&self, token: &str, ttl_secs: i64) -> Result<(), AppError> {
        if ttl_secs <= 0 {
            log::debug!("이미 만료된 토큰은 블랙리스트에 등록하지 않습니다");
            return Ok(());
        }

        self.redis
            .set_with_expiry(&blacklist_key(token), "1", ttl_secs as u64)
            .await?;

        log::debug!("액세스 토큰 블랙리스트 등록 (ttl: {}초)", ttl_secs);
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.redis.exists(&blacklist_key(token)).await?)
    }
}

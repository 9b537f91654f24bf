//! # Redis 클라이언트 구현
//!
//! 토큰 블랙리스트처럼 TTL 기반으로 자동 만료되는 키를 다루기 위한
//! 얇은 비동기 Redis 래퍼입니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 처리합니다.

use redis::{AsyncCommands, Client};
use std::env;

/// Redis 클라이언트 래퍼
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
///
/// // 60초 후 자동 만료
/// redis.set_with_expiry("bl_eyJ...", "1", 60).await?;
/// assert!(redis.exists("bl_eyJ...").await?);
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 Redis 서버 주소를 읽어오며,
    /// 설정되지 않은 경우 기본값 `redis://localhost:6379`를 사용합니다.
    /// 생성 시 PING으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, redis::RedisError> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// `SET key value EX seconds`
    ///
    /// 기존 키가 있으면 값과 TTL을 모두 덮어씁니다.
    pub async fn set_with_expiry(&self, key: &str, value: &str, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex(key, value, seconds).await
    }

    /// 키 존재 여부를 확인합니다.
    ///
    /// 만료된 키는 Redis가 자동으로 제거하므로 `false`가 반환됩니다.
    pub async fn exists(&self, key: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.exists(key).await
    }
}

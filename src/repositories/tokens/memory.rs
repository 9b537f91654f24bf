//! 메모리 기반 [`RevocationLedger`] 구현
//!
//! 만료 시각을 함께 저장하고 조회 시점에 지난 엔트리를 제거합니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::errors::AppError;
use crate::repositories::tokens::revocation_ledger::{blacklist_key, RevocationLedger};

#[derive(Default)]
pub struct InMemoryRevocationLedger {
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::RedisError("revocation ledger lock poisoned".to_string())
    }
}

#[async_trait]
impl RevocationLedger for InMemoryRevocationLedger {
    async fn blacklist(&self, token: &str, ttl_secs: i64) -> Result<(), AppError> {
        if ttl_secs <= 0 {
            return Ok(());
        }

        let expires_at = Instant::now() + Duration::from_secs(ttl_secs as u64);
        self.entries
            .write()
            .map_err(|_| Self::poisoned())?
            .insert(blacklist_key(token), expires_at);
        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> Result<bool, AppError> {
        let key = blacklist_key(token);
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;

        match entries.get(&key) {
            Some(expires_at) if *expires_at > Instant::now() => Ok(true),
            Some(_) => {
                entries.remove(&key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

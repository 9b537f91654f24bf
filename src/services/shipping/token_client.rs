//! # 외부 API 토큰 클라이언트
//!
//! Shiprocket API 호출에 필요한 Bearer 토큰을 프로세스 전체에서 하나만 캐시합니다.
//! 토큰 자체의 `exp` 클레임으로 만료를 판단하며, 만료된 토큰은 절대 사용하지 않습니다.
//!
//! ## 단일 재인증 보장
//!
//! 캐시는 `tokio::sync::Mutex`로 보호되고, 재인증은 락을 쥔 채로 수행됩니다.
//! 동시에 만료를 관찰한 호출들은 첫 호출자의 재인증 결과를 기다렸다가 그대로 사용합니다.

use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use crate::errors::AppError;
use crate::utils::jwt_payload::unverified_expiry;

/// 외부 제공자로부터 새 토큰을 받아오는 경로
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<String, AppError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// `POST {base}/auth/login` 으로 토큰을 발급받는 Shiprocket 인증기
pub struct ShiprocketAuthenticator {
    http: Client,
    base_url: String,
    email: String,
    password: String,
}

impl ShiprocketAuthenticator {
    pub fn new(http: Client, base_url: String, email: String, password: String) -> Self {
        Self { http, base_url, email, password }
    }
}

#[async_trait]
impl TokenSource for ShiprocketAuthenticator {
    async fn fetch_token(&self) -> Result<String, AppError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&LoginBody { email: &self.email, password: &self.password })
            .send()
            .await
            .map_err(|e| {
                log::error!("Shiprocket 인증 요청 실패: {}", e);
                AppError::ExternalServiceError("Shipping provider authentication failed".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Shiprocket 인증 거부: HTTP {}", status);
            return Err(AppError::ExternalServiceError(
                "Shipping provider authentication failed".to_string(),
            ));
        }

        let body: LoginResponse = response.json().await.map_err(|e| {
            log::error!("Shiprocket 인증 응답 파싱 실패: {}", e);
            AppError::ExternalServiceError("Shipping provider authentication failed".to_string())
        })?;

        log::info!("🚚 Shiprocket 인증 성공");
        Ok(body.token)
    }
}

struct CachedToken {
    value: String,
    /// `exp` 클레임. 읽을 수 없으면 `None`이며 만료된 것으로 취급합니다.
    expires_at: Option<i64>,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp > now)
    }
}

/// 캐시된 Bearer 토큰으로 요청 헤더를 만들어주는 클라이언트
pub struct ExternalTokenClient {
    source: Arc<dyn TokenSource>,
    cached: Mutex<Option<CachedToken>>,
}

impl ExternalTokenClient {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            cached: Mutex::new(None),
        }
    }

    /// 유효한 토큰을 반환합니다. 없거나 만료되었으면 한 번만 재인증합니다.
    ///
    /// 재인증 실패는 호출자에게 그대로 전달되며 재시도하지 않습니다.
    pub async fn bearer_token(&self) -> Result<String, AppError> {
        let mut cached = self.cached.lock().await;

        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        log::debug!("Shiprocket 토큰이 없거나 만료되어 재인증합니다");
        let value = self.source.fetch_token().await?;
        let expires_at = unverified_expiry(&value);
        if expires_at.is_none() {
            log::warn!("Shiprocket 토큰에서 exp를 읽을 수 없습니다. 다음 호출에서 다시 인증합니다");
        }

        *cached = Some(CachedToken { value: value.clone(), expires_at });
        Ok(value)
    }

    /// `Content-Type: application/json` 과 `Authorization: Bearer <token>` 헤더
    pub async fn get_headers(&self) -> Result<header::HeaderMap, AppError> {
        let token = self.bearer_token().await?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                AppError::ExternalServiceError("Shipping provider returned a malformed token".to_string())
            })?,
        );
        Ok(headers)
    }
}

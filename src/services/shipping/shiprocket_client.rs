//! # Shiprocket 주문 클라이언트
//!
//! 모든 요청은 [`ExternalTokenClient`]가 만든 헤더를 사용합니다.
//! 외부 호출 실패는 요청 안에서 재시도하지 않고 `ExternalServiceError`(502)로 돌려줍니다.

use std::sync::Arc;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use crate::errors::AppError;
use crate::services::shipping::token_client::ExternalTokenClient;

pub struct ShiprocketClient {
    http: Client,
    base_url: String,
    tokens: Arc<ExternalTokenClient>,
}

impl ShiprocketClient {
    pub fn new(http: Client, base_url: String, tokens: Arc<ExternalTokenClient>) -> Self {
        Self { http, base_url, tokens }
    }

    /// 주문 생성 (`POST /orders/create/adhoc`)
    ///
    /// 주문 본문은 JSON 객체여야 하며 필드 구성은 Shiprocket 규격을 그대로 따릅니다.
    pub async fn create_order(&self, order: &Value) -> Result<Value, AppError> {
        if !order.is_object() {
            return Err(AppError::ValidationError("Order payload must be a JSON object".to_string()));
        }

        let url = format!("{}/orders/create/adhoc", self.base_url);
        self.send(self.http.post(&url).json(order), "Order creation failed").await
    }

    /// 주문 목록 조회 (`GET /orders`)
    pub async fn list_orders(&self) -> Result<Value, AppError> {
        let url = format!("{}/orders", self.base_url);
        self.send(self.http.get(&url), "Fetching orders failed").await
    }

    /// 단일 주문 조회 (`GET /orders/show/{id}`)
    pub async fn get_order(&self, order_id: &str) -> Result<Value, AppError> {
        let order_id = order_id.trim();
        if order_id.is_empty() || !order_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::ValidationError("Invalid order id".to_string()));
        }

        let url = format!("{}/orders/show/{}", self.base_url, order_id);
        self.send(self.http.get(&url), "Fetching order failed").await
    }

    async fn send(&self, request: RequestBuilder, failure: &str) -> Result<Value, AppError> {
        let headers = self.tokens.get_headers().await?;

        let response = request.headers(headers).send().await.map_err(|e| {
            log::error!("{}: {}", failure, e);
            AppError::ExternalServiceError(failure.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("{}: HTTP {} {}", failure, status, body);
            return Err(AppError::ExternalServiceError(failure.to_string()));
        }

        response.json::<Value>().await.map_err(|e| {
            log::error!("{}: 응답 파싱 실패 {}", failure, e);
            AppError::ExternalServiceError(failure.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use serde_json::json;
    use crate::services::shipping::token_client::tests::CountingSource;

    fn client(source: Arc<CountingSource>) -> ShiprocketClient {
        let http = Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        // 닫힌 포트: 연결이 즉시 거부됨
        ShiprocketClient::new(
            http,
            "http://127.0.0.1:9".to_string(),
            Arc::new(ExternalTokenClient::new(source)),
        )
    }

    #[actix_web::test]
    async fn test_rejects_non_object_order_before_authenticating() {
        let source = Arc::new(CountingSource::new(vec![3600]));
        let err = client(source.clone()).create_order(&json!([1, 2])).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(source.calls(), 0);
    }

    #[actix_web::test]
    async fn test_rejects_malformed_order_id() {
        let source = Arc::new(CountingSource::new(vec![3600]));
        let err = client(source).get_order("../admin").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_web::test]
    async fn test_unreachable_upstream_is_external_error() {
        let source = Arc::new(CountingSource::new(vec![3600]));
        let client = client(source.clone());

        let err = client.create_order(&json!({ "order_id": "A-1" })).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));

        let err = client.list_orders().await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));

        // 토큰은 한 번만 발급되고 재사용됨
        assert_eq!(source.calls(), 1);
    }
}

//! 성공 응답 공통 봉투
//!
//! 모든 성공 응답은 `{ statusCode, data, message, success }` 형태를 가집니다.
//! 실패 응답은 [`crate::errors::ErrorBody`]가 담당합니다.

use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, data, message)
    }

    /// 이미 쿠키 등을 설정한 빌더에 본문을 붙여 응답을 완성합니다.
    pub fn respond_with(self, mut builder: HttpResponseBuilder) -> HttpResponse {
        builder.json(self)
    }

    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        self.respond_with(HttpResponse::build(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let body = ApiResponse::new(StatusCode::CREATED, json!({"id": 1}), "User registered successfully");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "User registered successfully");
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = ApiResponse::new(StatusCode::CREATED, json!({}), "created").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

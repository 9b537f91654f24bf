use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::domain::models::token::AccessClaims;
use crate::errors::AppError;

/// 인증 미들웨어가 검증을 마친 요청 주체
///
/// 미들웨어가 request extensions에 넣어두며, 핸들러는 인자로 바로 받습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    /// 이 요청에 사용된 액세스 토큰 (로그아웃 시 블랙리스트 대상)
    #[serde(skip)]
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: AccessClaims, access_token: String) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email,
            username: claims.username,
            full_name: claims.full_name,
            access_token,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "Unauthorized request".to_string(),
            ))),
        }
    }
}

//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `accessToken` 쿠키 또는 Bearer 헤더에서 토큰 추출
//! - 서명/만료 검증, 로그아웃 블랙리스트 확인, 사용자 존재 확인
//! - 요청 주체를 request extension에 저장
//!
//! ```rust,ignore
//! #[post("/logout", wrap = "AuthMiddleware::required()")]
//! pub async fn logout(user: AuthenticatedUser, ...) -> Result<HttpResponse, AppError> { ... }
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;

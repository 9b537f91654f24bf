//! Authentication HTTP Handlers
//!
//! 세션 수명주기 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 |
//! |--------|------|------|
//! | `POST` | `/api/v1/users/login` | 없음 |
//! | `POST` | `/api/v1/users/logout` | 액세스 토큰 |
//! | `POST` | `/api/v1/users/refresh-token` | 리프레시 토큰 쿠키 |
//! | `POST` | `/api/v1/users/change-password` | 액세스 토큰 |
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::registry::ServiceRegistry;
use crate::domain::dto::api_response::ApiResponse;
use crate::domain::dto::users::request::{ChangePasswordRequest, LoginRequest};
use crate::domain::dto::users::response::{LoginResponse, RefreshResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::{removal_cookie, session_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::middlewares::AuthMiddleware;
use crate::services::auth::RefreshOutcome;

#[post("/login")]
pub async fn login(
    registry: web::Data<ServiceRegistry>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let outcome = registry
        .sessions
        .login(payload.identity(), &payload.password)
        .await?;

    // 토큰은 httpOnly 쿠키로만 전달
    let mut builder = HttpResponse::Ok();
    builder
        .cookie(session_cookie(ACCESS_TOKEN_COOKIE, outcome.tokens.access_token))
        .cookie(session_cookie(REFRESH_TOKEN_COOKIE, outcome.tokens.refresh_token));

    let body = LoginResponse { user: outcome.user };

    Ok(ApiResponse::ok(body, "User logged in successfully").respond_with(builder))
}

#[post("/logout", wrap = "AuthMiddleware::required()")]
pub async fn logout(
    registry: web::Data<ServiceRegistry>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    registry
        .sessions
        .logout(&user, Some(&user.access_token))
        .await?;

    let mut builder = HttpResponse::Ok();
    builder
        .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(removal_cookie(REFRESH_TOKEN_COOKIE));

    Ok(ApiResponse::ok(json!({}), "User logged out successfully").respond_with(builder))
}

#[post("/refresh-token")]
pub async fn refresh_token(
    registry: web::Data<ServiceRegistry>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let refresh = req.cookie(REFRESH_TOKEN_COOKIE);
    let access = req.cookie(ACCESS_TOKEN_COOKIE);

    let outcome = registry
        .sessions
        .refresh(refresh.as_ref().map(|c| c.value()), access.as_ref().map(|c| c.value()))
        .await?;

    match outcome {
        RefreshOutcome::StillValid => Ok(ApiResponse::ok(
            RefreshResponse { access_token: None },
            "Access token is still valid",
        )
        .into_response()),
        RefreshOutcome::Renewed { access_token } => {
            let mut builder = HttpResponse::Ok();
            builder.cookie(session_cookie(ACCESS_TOKEN_COOKIE, access_token.clone()));

            Ok(ApiResponse::ok(
                RefreshResponse { access_token: Some(access_token) },
                "Access token refreshed",
            )
            .respond_with(builder))
        }
    }
}

#[post("/change-password", wrap = "AuthMiddleware::required()")]
pub async fn change_password(
    registry: web::Data<ServiceRegistry>,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    registry
        .sessions
        .change_password(
            &user.user_id,
            &payload.current_password,
            &payload.new_password,
            &payload.confirm_password,
        )
        .await?;

    Ok(ApiResponse::ok(json!({}), "Password changed successfully").into_response())
}

//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::registry::ServiceRegistry;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::ACCESS_TOKEN_COOKIE;
use crate::services::auth::TokenError;
use crate::utils::string_utils::extract_bearer_token;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let result = match req.app_data::<web::Data<ServiceRegistry>>().cloned() {
                Some(registry) => authenticate(&req, &registry).await,
                None => Err(AppError::InternalError("ServiceRegistry가 등록되지 않았습니다".to_string())),
            };

            match result {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(err) => {
                    log::warn!("인증 실패 {} {}: {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 쿠키 우선, 없으면 Bearer 헤더
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| {
            req.headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(extract_bearer_token)
                .map(str::to_string)
        })
}

/// 토큰 검증 → 블랙리스트 확인 → 사용자 존재 확인
async fn authenticate(
    req: &ServiceRequest,
    registry: &ServiceRegistry,
) -> Result<AuthenticatedUser, AppError> {
    let token = extract_access_token(req)
        .ok_or_else(|| AppError::AuthenticationError("Unauthorized request".to_string()))?;

    let claims = registry.tokens.verify_access(&token).map_err(|e| match e {
        TokenError::Expired => AppError::AuthenticationError("Access token expired".to_string()),
        TokenError::Invalid => AppError::AuthenticationError("Invalid Access Token".to_string()),
    })?;

    if registry.ledger.is_blacklisted(&token).await? {
        return Err(AppError::AuthenticationError("Token has been revoked".to_string()));
    }

    let user = registry
        .credentials
        .find_by_id(&claims.id)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Invalid Access Token".to_string()))?;

    Ok(AuthenticatedUser {
        user_id: claims.id,
        email: user.email,
        username: user.username,
        full_name: user.full_name,
        access_token: token,
    })
}

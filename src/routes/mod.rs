//! 라우트 구성 모듈
//!
//! ```text
//! GET  /health
//! /api/v1/users
//!   POST register | login | refresh-token
//!   POST logout | updateUserdetail | updateAvatar      (인증 필요)
//!   POST change-password                               (인증 필요)
//!   GET  current-user                                  (인증 필요)
//! /shiprocket                                          (인증 필요)
//!   POST order
//!   GET  getOrder | getOrder/{id}
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// JSON 본문 파싱 실패도 공통 에러 봉투(400)로 응답하도록 설정합니다.
///
/// ```rust,ignore
/// let app = App::new()
///     .app_data(web::Data::new(registry))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }));

    // Health check endpoint
    cfg.service(health_check);

    configure_user_routes(cfg);
    configure_shipping_routes(cfg);
}

/// 계정 및 세션 라우트
///
/// 보호된 핸들러는 각자 `AuthMiddleware`를 감싸고 있습니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::logout)
            .service(handlers::auth::change_password)
            .service(handlers::users::current_user)
            .service(handlers::users::update_user_detail)
            .service(handlers::users::update_avatar),
    );
}

fn configure_shipping_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shiprocket")
            .service(handlers::shipping::create_order)
            .service(handlers::shipping::list_orders)
            .service(handlers::shipping::get_order),
    );
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "shopfront_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "revocation": "Redis",
            "shipping": "Shiprocket"
        }
    }))
}

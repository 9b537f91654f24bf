//! Shiprocket 주문 프록시 핸들러
//!
//! 모두 로그인한 사용자만 호출할 수 있습니다.
use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use serde_json::Value;
use crate::core::registry::ServiceRegistry;
use crate::domain::dto::api_response::ApiResponse;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;

#[post("/order", wrap = "AuthMiddleware::required()")]
pub async fn create_order(
    registry: web::Data<ServiceRegistry>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let order = registry.shipping.create_order(&payload).await?;
    Ok(ApiResponse::new(StatusCode::CREATED, order, "Order created successfully").into_response())
}

#[get("/getOrder", wrap = "AuthMiddleware::required()")]
pub async fn list_orders(registry: web::Data<ServiceRegistry>) -> Result<HttpResponse, AppError> {
    let orders = registry.shipping.list_orders().await?;
    Ok(ApiResponse::ok(orders, "Orders fetched successfully").into_response())
}

#[get("/getOrder/{id}", wrap = "AuthMiddleware::required()")]
pub async fn get_order(
    registry: web::Data<ServiceRegistry>,
    order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = registry.shipping.get_order(&order_id).await?;
    Ok(ApiResponse::ok(order, "Order fetched successfully").into_response())
}

//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users/register` | multipart 회원가입 | 201 Created |
//! | `GET` | `/api/v1/users/current-user` | 현재 사용자 조회 | 200 OK |
//! | `POST` | `/api/v1/users/updateUserdetail` | 이름/이메일 수정 | 200 OK |
//! | `POST` | `/api/v1/users/updateAvatar` | multipart 아바타 교체 | 200 OK |
use actix_multipart::{Field, Multipart};
use actix_web::{get, http::StatusCode, post, web, HttpResponse};
use futures_util::TryStreamExt;
use crate::core::registry::ServiceRegistry;
use crate::domain::dto::api_response::ApiResponse;
use crate::domain::dto::users::request::{RegisterForm, UpdateAccountRequest, UploadedFile};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;

/// 업로드 파일 하나의 최대 크기
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[post("/register")]
pub async fn register(
    registry: web::Data<ServiceRegistry>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_register_form(&mut payload).await?;
    let user = registry.users.register(form).await?;

    Ok(ApiResponse::new(StatusCode::CREATED, user, "User registered successfully").into_response())
}

#[get("/current-user", wrap = "AuthMiddleware::required()")]
pub async fn current_user(
    registry: web::Data<ServiceRegistry>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = registry.users.current_user(&user.user_id).await?;
    Ok(ApiResponse::ok(profile, "Current user fetched successfully").into_response())
}

#[post("/updateUserdetail", wrap = "AuthMiddleware::required()")]
pub async fn update_user_detail(
    registry: web::Data<ServiceRegistry>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = registry
        .users
        .update_account_detail(&user.user_id, payload.into_inner())
        .await?;

    Ok(ApiResponse::ok(profile, "Account details updated successfully").into_response())
}

#[post("/updateAvatar", wrap = "AuthMiddleware::required()")]
pub async fn update_avatar(
    registry: web::Data<ServiceRegistry>,
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let avatar = read_avatar(&mut payload).await?;
    let profile = registry.users.update_avatar(&user.user_id, avatar).await?;

    Ok(ApiResponse::ok(profile, "Avatar updated successfully").into_response())
}

fn malformed(e: impl std::fmt::Display) -> AppError {
    AppError::ValidationError(format!("Malformed multipart body: {}", e))
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::ValidationError("Uploaded file is too large".to_string()));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn uploaded_file(field: &Field, name: &str, bytes: Vec<u8>) -> UploadedFile {
    UploadedFile {
        file_name: field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string()),
        content_type: field.content_type().map(|mime| mime.to_string()),
        bytes,
    }
}

/// `avatar` 파일 하나만 읽습니다. 다른 필드는 무시합니다.
async fn read_avatar(payload: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    let mut avatar = None;

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = read_field(&mut field).await?;

        if name != "avatar" {
            log::debug!("알 수 없는 폼 필드 무시: {}", name);
            continue;
        }
        if avatar.is_some() {
            return Err(AppError::ValidationError("Only one avatar file is allowed".to_string()));
        }
        avatar = Some(uploaded_file(&field, &name, bytes));
    }

    Ok(avatar)
}

/// multipart 본문을 회원가입 폼으로 읽습니다. 파일 필드는 각각 최대 1개입니다.
async fn read_register_form(payload: &mut Multipart) -> Result<RegisterForm, AppError> {
    let mut form = RegisterForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        let bytes = read_field(&mut field).await?;

        match name.as_str() {
            "avatar" | "coverImage" => {
                let slot = if name == "avatar" { &mut form.avatar } else { &mut form.cover_image };
                if slot.is_some() {
                    return Err(AppError::ValidationError(format!("Only one {} file is allowed", name)));
                }
                *slot = Some(uploaded_file(&field, &name, bytes));
            }
            _ => {
                let value = String::from_utf8(bytes).map_err(malformed)?;
                if !form.set_field(&name, value) {
                    log::debug!("알 수 없는 폼 필드 무시: {}", name);
                }
            }
        }
    }

    Ok(form)
}

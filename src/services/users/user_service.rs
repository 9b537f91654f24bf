//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 현재 사용자 조회, 계정 정보 수정을 담당합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 UserService                  │
//! │  • 회원가입 폼 검증 / 중복 확인              │
//! │  • 아바타·커버 이미지 업로드 (MediaStore)    │
//! │  • Entity → DTO 변환 (민감 정보 제거)        │
//! └──────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!            CredentialService → UserStore
//! ```

use std::sync::Arc;
use validator::Validate;
use crate::domain::dto::users::request::{RegisterForm, UpdateAccountRequest, UploadedFile};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::users::user::NewAccount;
use crate::errors::AppError;
use crate::repositories::users::ProfileUpdate;
use crate::services::media::MediaStore;
use crate::services::users::credential_service::CredentialService;
use crate::utils::string_utils::normalize_identity;

pub struct UserService {
    credentials: Arc<CredentialService>,
    media: Arc<dyn MediaStore>,
}

impl UserService {
    pub fn new(credentials: Arc<CredentialService>, media: Arc<dyn MediaStore>) -> Self {
        Self { credentials, media }
    }

    /// 새 고객 계정을 등록합니다.
    ///
    /// 중복 확인이 업로드보다 먼저 수행되므로 거절된 가입은 파일을 올리지 않습니다.
    pub async fn register(&self, form: RegisterForm) -> Result<UserResponse, AppError> {
        form.ensure_complete()?;

        let username = normalize_identity(&form.username);
        let email = normalize_identity(&form.email);

        if self.credentials.exists_by_username_or_email(&username, &email).await? {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        let RegisterForm { full_name, password, avatar, cover_image, .. } = form;

        let avatar = avatar
            .ok_or_else(|| AppError::ValidationError("Avatar file is required".to_string()))?;
        let avatar_url = self.media.upload(avatar).await?.url;

        let cover_image_url = match cover_image {
            Some(file) => Some(self.media.upload(file).await?.url),
            None => None,
        };

        let account = NewAccount::new(&username, &email, &full_name, avatar_url, cover_image_url)?;
        let user = self.credentials.create(account, &password).await?;

        log::info!("신규 사용자 등록: {}", user.username);
        Ok(UserResponse::from(user))
    }

    pub async fn current_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        self.credentials
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    /// 이름/이메일 수정. 둘 다 없으면 거절합니다.
    pub async fn update_account_detail(
        &self,
        user_id: &str,
        request: UpdateAccountRequest,
    ) -> Result<UserResponse, AppError> {
        if request.is_empty() {
            return Err(AppError::ValidationError(
                "At least one of fullName or email is required".to_string(),
            ));
        }
        request.validate()?;

        let email = request.email.as_deref().map(normalize_identity);
        if let Some(email) = email.as_deref() {
            if let Some(owner) = self.credentials.find_by_identity(email).await? {
                if owner.id_string().as_deref() != Some(user_id) {
                    return Err(AppError::ConflictError("Email is already in use".to_string()));
                }
            }
        }

        let update = ProfileUpdate {
            full_name: request.full_name,
            email,
        };

        self.credentials
            .update_profile(user_id, update)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    /// 아바타 이미지를 올리고 계정의 아바타 URL만 교체합니다.
    pub async fn update_avatar(
        &self,
        user_id: &str,
        avatar: Option<UploadedFile>,
    ) -> Result<UserResponse, AppError> {
        let avatar = avatar
            .ok_or_else(|| AppError::ValidationError("Avatar file is missing".to_string()))?;

        let url = self.media.upload(avatar).await?.url;

        let user = self
            .credentials
            .set_avatar(user_id, &url)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        log::info!("아바타 변경: {}", user.username);
        Ok(UserResponse::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserStore;
    use crate::services::media::InMemoryMediaStore;

    struct Fixture {
        service: UserService,
        media: Arc<InMemoryMediaStore>,
    }

    fn fixture() -> Fixture {
        let credentials = Arc::new(CredentialService::new(Arc::new(InMemoryUserStore::new()), 4));
        let media = Arc::new(InMemoryMediaStore::new());
        Fixture {
            service: UserService::new(credentials, media.clone()),
            media,
        }
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile { file_name: name.into(), content_type: Some("image/png".into()), bytes: vec![1, 2, 3] }
    }

    fn form(username: &str, email: &str) -> RegisterForm {
        let mut form = RegisterForm::default();
        form.set_field("fullName", "Alice Liddell".into());
        form.set_field("username", username.into());
        form.set_field("email", email.into());
        form.set_field("password", "pw123".into());
        form.avatar = Some(file("avatar.png"));
        form
    }

    #[actix_web::test]
    async fn test_register_normalizes_and_uploads() {
        let f = fixture();
        let mut form = form("Alice", "Alice@X.com");
        form.cover_image = Some(file("cover.png"));

        let user = f.service.register(form).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@x.com");
        assert!(user.avatar.ends_with("avatar.png"));
        assert!(user.cover_image.unwrap().ends_with("cover.png"));
        assert_eq!(f.media.uploaded(), vec!["avatar.png", "cover.png"]);
    }

    #[actix_web::test]
    async fn test_register_conflict_skips_upload() {
        let f = fixture();
        f.service.register(form("alice", "alice@x.com")).await.unwrap();

        let err = f.service.register(form("ALICE", "other@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(f.media.uploaded().len(), 1);
    }

    #[actix_web::test]
    async fn test_register_requires_avatar() {
        let f = fixture();
        let mut form = form("alice", "alice@x.com");
        form.avatar = None;

        match f.service.register(form).await {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Avatar file is required"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_update_avatar() {
        let f = fixture();
        let alice = f.service.register(form("alice", "alice@x.com")).await.unwrap();

        match f.service.update_avatar(&alice.id, None).await {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Avatar file is missing"),
            other => panic!("unexpected: {:?}", other),
        }

        let updated = f.service.update_avatar(&alice.id, Some(file("new.png"))).await.unwrap();
        assert!(updated.avatar.ends_with("new.png"));
        assert_ne!(updated.avatar, alice.avatar);
        assert_eq!(f.service.current_user(&alice.id).await.unwrap().avatar, updated.avatar);

        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(matches!(
            f.service.update_avatar(&missing, Some(file("x.png"))).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_update_account_detail() {
        let f = fixture();
        let bob = f.service.register(form("bob", "bob@x.com")).await.unwrap();
        let alice = f.service.register(form("alice", "alice@x.com")).await.unwrap();

        let empty: UpdateAccountRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            f.service.update_account_detail(&alice.id, empty).await,
            Err(AppError::ValidationError(_))
        ));

        let taken: UpdateAccountRequest = serde_json::from_str(r#"{"email":"BOB@x.com"}"#).unwrap();
        assert!(matches!(
            f.service.update_account_detail(&alice.id, taken).await,
            Err(AppError::ConflictError(_))
        ));

        let own: UpdateAccountRequest =
            serde_json::from_str(r#"{"fullName":"Alice L","email":"alice@x.com"}"#).unwrap();
        let updated = f.service.update_account_detail(&alice.id, own).await.unwrap();
        assert_eq!(updated.full_name, "Alice L");

        assert_eq!(f.service.current_user(&bob.id).await.unwrap().username, "bob");
    }
}

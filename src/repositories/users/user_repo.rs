//! # 사용자 리포지토리 구현
//!
//! [`UserStore`]의 MongoDB 구현입니다.
//!
//! - **컬렉션명**: `users`
//! - **인덱스**: email(unique), username(unique), created_at(desc)
//!
//! 중복 검사는 서비스에서 먼저 수행하지만, 동시 가입 경쟁은
//! 유니크 인덱스의 duplicate key 에러(11000)를 `ConflictError`로 변환해서 처리합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    db::Database,
    domain::entities::users::user::{PasswordHash, User},
    errors::AppError,
    repositories::users::user_store::{parse_user_id, ProfileUpdate, UserStore},
};

const COLLECTION: &str = "users";
const DUPLICATE_KEY: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(COLLECTION)
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        matches!(
            err.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
        )
    }

    fn map_write_error(err: mongodb::error::Error, conflict: &str) -> AppError {
        if Self::is_duplicate_key(&err) {
            AppError::ConflictError(conflict.to_string())
        } else {
            AppError::from(err)
        }
    }

    async fn set_fields(&self, id: &str, update: Document) -> Result<(), AppError> {
        let Some(object_id) = parse_user_id(id) else {
            return Err(AppError::NotFound("User does not exist".to_string()));
        };
        let result = self
            .collection()
            .update_one(doc! { "_id": object_id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("User does not exist".to_string()));
        }
        Ok(())
    }

    /// `$set` 후 수정된 문서를 반환합니다. 없는 ID는 `Ok(None)`.
    async fn set_and_return(&self, id: &str, fields: Document, conflict: &str) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_user_id(id) else {
            return Ok(None);
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": fields })
            .with_options(options)
            .await
            .map_err(|e| Self::map_write_error(e, conflict))?;

        Ok(updated)
    }

    /// 유니크 인덱스 생성 (시작 시 1회)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, username_index, created_at_index])
            .await?;

        log::info!("📇 users 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, AppError> {
        let user = self
            .collection()
            .find_one(doc! { "$or": [ { "username": identity }, { "email": identity } ] })
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_user_id(id) else {
            return Ok(None);
        };

        let user = self.collection().find_one(doc! { "_id": object_id }).await?;
        Ok(user)
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let found = self
            .collection()
            .find_one(doc! { "$or": [ { "username": username }, { "email": email } ] })
            .await?;
        Ok(found.is_some())
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| Self::map_write_error(e, "User with email or username already exists"))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("insert_one did not return an ObjectId".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        let update = match token {
            Some(token) => doc! {
                "$set": { "refresh_token": token, "updated_at": DateTime::now() }
            },
            None => doc! {
                "$unset": { "refresh_token": "" },
                "$set": { "updated_at": DateTime::now() }
            },
        };
        self.set_fields(id, update).await
    }

    async fn set_password(&self, id: &str, password: &PasswordHash) -> Result<(), AppError> {
        self.set_fields(id, doc! {
            "$set": { "password": password.as_str(), "updated_at": DateTime::now() }
        })
        .await
    }

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        let mut fields = doc! { "updated_at": DateTime::now() };
        if let Some(full_name) = update.full_name {
            fields.insert("full_name", full_name);
        }
        if let Some(email) = update.email {
            fields.insert("email", email);
        }

        self.set_and_return(id, fields, "Email is already in use").await
    }

    async fn set_avatar(&self, id: &str, url: &str) -> Result<Option<User>, AppError> {
        let fields = doc! { "avatar": url, "updated_at": DateTime::now() };
        self.set_and_return(id, fields, "Avatar update conflict").await
    }
}

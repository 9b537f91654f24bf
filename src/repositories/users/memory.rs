//! 메모리 기반 [`UserStore`] 구현
//!
//! 통합 테스트와 로컬 실험용입니다. MongoDB 구현과 같은 유니크 규칙을 따릅니다.

use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};
use crate::domain::entities::users::user::{PasswordHash, User};
use crate::errors::AppError;
use crate::repositories::users::user_store::{parse_user_id, ProfileUpdate, UserStore};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::InternalError("user store lock poisoned".to_string())
    }

    fn modify<F>(&self, id: &str, apply: F) -> Result<Option<User>, AppError>
    where
        F: FnOnce(&mut User) -> Result<(), AppError>,
    {
        let Some(object_id) = parse_user_id(id) else {
            return Ok(None);
        };

        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        match users.get_mut(&object_id) {
            Some(user) => {
                apply(user)?;
                user.updated_at = DateTime::now();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users
            .values()
            .find(|u| u.username == identity || u.email == identity)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(object_id) = parse_user_id(id) else {
            return Ok(None);
        };
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.get(&object_id).cloned())
    }

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().any(|u| u.username == username || u.email == email))
    }

    async fn insert(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;
        if users.values().any(|u| u.username == user.username || u.email == user.email) {
            return Err(AppError::ConflictError(
                "User with email or username already exists".to_string(),
            ));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        self.modify(id, |user| {
            user.refresh_token = token.map(str::to_string);
            Ok(())
        })?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    async fn set_password(&self, id: &str, password: &PasswordHash) -> Result<(), AppError> {
        self.modify(id, |user| {
            user.password = password.clone();
            Ok(())
        })?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))
    }

    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        if let Some(email) = update.email.as_deref() {
            let users = self.users.read().map_err(|_| Self::poisoned())?;
            let taken = users
                .values()
                .any(|u| u.email == email && u.id_string().as_deref() != Some(id));
            if taken {
                return Err(AppError::ConflictError("Email is already in use".to_string()));
            }
        }

        self.modify(id, |user| {
            if let Some(full_name) = update.full_name {
                user.full_name = full_name;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            Ok(())
        })
    }

    async fn set_avatar(&self, id: &str, url: &str) -> Result<Option<User>, AppError> {
        self.modify(id, |user| {
            user.avatar = url.to_string();
            Ok(())
        })
    }
}

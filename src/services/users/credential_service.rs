//! # 자격 증명 서비스
//!
//! 계정 저장소 위에서 비밀번호 해싱과 검증을 담당합니다.
//! 평문 비밀번호는 이 서비스를 통과하는 순간 해시로 바뀌며 저장되거나 로그에 남지 않습니다.

use std::sync::Arc;
use std::time::Instant;
use crate::domain::entities::users::user::{NewAccount, PasswordHash, User};
use crate::errors::AppError;
use crate::repositories::users::{ProfileUpdate, UserStore};

pub struct CredentialService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    fn hash(&self, plaintext: &str) -> Result<PasswordHash, AppError> {
        let started = Instant::now();
        let hash = PasswordHash::from_plaintext(plaintext, self.bcrypt_cost)?;
        log::debug!("Password hashing took: {:?} (cost {})", started.elapsed(), self.bcrypt_cost);
        Ok(hash)
    }

    pub async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, AppError> {
        self.store.find_by_identity(identity).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError> {
        self.store.exists_by_username_or_email(username, email).await
    }

    /// 비밀번호를 해싱한 뒤 새 계정을 저장합니다.
    pub async fn create(&self, account: NewAccount, plaintext: &str) -> Result<User, AppError> {
        let password = self.hash(plaintext)?;
        self.store.insert(User::new_customer(account, password)).await
    }

    pub async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError> {
        self.store.set_refresh_token(id, token).await
    }

    /// 새 비밀번호를 해싱해 해시 필드만 교체합니다.
    pub async fn set_password(&self, id: &str, plaintext: &str) -> Result<(), AppError> {
        let password = self.hash(plaintext)?;
        self.store.set_password(id, &password).await
    }

    /// 저장된 해시와 후보 비밀번호를 비교합니다.
    pub async fn verify_password(&self, id: &str, candidate: &str) -> Result<bool, AppError> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;
        Ok(user.password.matches(candidate))
    }

    pub async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        self.store.update_profile(id, update).await
    }

    pub async fn set_avatar(&self, id: &str, url: &str) -> Result<Option<User>, AppError> {
        self.store.set_avatar(id, url).await
    }
}

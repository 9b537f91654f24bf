//! 계정 저장소 추상화
//!
//! 서비스 계층은 [`UserStore`] 트레이트에만 의존하며,
//! 운영 환경에서는 MongoDB 구현이, 테스트에서는 메모리 구현이 주입됩니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::users::user::{PasswordHash, User};
use crate::errors::AppError;

/// 계정 정보 부분 수정 내용
///
/// 비밀번호 해시는 이 경로로 변경할 수 없습니다.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// 문자열 ID를 ObjectId로 변환
///
/// 모든 저장소 구현이 같은 규칙을 씁니다: 형식이 잘못된 ID는 "존재하지 않는 사용자"입니다.
pub(crate) fn parse_user_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자명 또는 이메일로 조회 (입력값은 정규화된 상태여야 함)
    async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, AppError>;

    /// ID로 조회
    ///
    /// 형식이 잘못된 ID는 어떤 문서와도 일치할 수 없으므로 `Ok(None)`입니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn exists_by_username_or_email(&self, username: &str, email: &str) -> Result<bool, AppError>;

    /// 새 계정 저장. 사용자명/이메일 중복이면 `ConflictError`.
    async fn insert(&self, user: User) -> Result<User, AppError>;

    /// 현재 리프레시 토큰 교체 (`None`이면 필드 제거)
    async fn set_refresh_token(&self, id: &str, token: Option<&str>) -> Result<(), AppError>;

    /// 비밀번호 해시만 교체
    async fn set_password(&self, id: &str, password: &PasswordHash) -> Result<(), AppError>;

    /// 프로필 수정 후 수정된 계정을 반환
    async fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<User>, AppError>;

    /// 아바타 URL만 교체하고 수정된 계정을 반환
    async fn set_avatar(&self, id: &str, url: &str) -> Result<Option<User>, AppError>;
}

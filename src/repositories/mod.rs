//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 저장소는 트레이트로 추상화되어 있고, 시작 시 구체 구현이
//! [`ServiceRegistry`](crate::core::registry::ServiceRegistry)를 통해 주입됩니다.
//!
//! - [`users`] - 계정 저장소 (MongoDB / 메모리)
//! - [`tokens`] - 액세스 토큰 블랙리스트 (Redis / 메모리)
//!
//! # Examples
//!
//! ```rust,ignore
//! let store: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(database));
//! let user = store.find_by_identity("alice").await?;
//! ```

pub mod users;
pub mod tokens;

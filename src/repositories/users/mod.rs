//! 계정 데이터 액세스 계층
//!
//! - [`user_store::UserStore`] - 저장소 트레이트
//! - [`user_repo::MongoUserRepository`] - MongoDB 구현
//! - [`memory::InMemoryUserStore`] - 메모리 구현

pub mod user_store;
pub mod user_repo;
pub mod memory;

pub use user_store::*;
pub use user_repo::MongoUserRepository;
pub use memory::InMemoryUserStore;

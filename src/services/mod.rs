//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! # Features
//!
//! - 계정 등록, 조회, 정보 수정
//! - JWT 액세스/리프레시 토큰 기반 세션 관리와 로그아웃 블랙리스트
//! - 아바타/커버 이미지 업로드
//! - Shiprocket 배송 API 연동 (토큰 캐시 + 단일 재인증)
//!
//! # Examples
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::initialize(database, redis).await?;
//! let outcome = registry.sessions.login(Some("alice"), "pw123").await?;
//! ```

pub mod users;
pub mod auth;
pub mod media;
pub mod shipping;

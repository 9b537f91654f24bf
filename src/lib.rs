//! 쇼핑몰 백엔드
//!
//! 고객 계정의 세션 수명 주기와 배송 연동을 담당하는 Rust 서비스입니다.
//! 로그인/로그아웃, 토큰 갱신, 비밀번호 변경, 폐기된 토큰 차단,
//! 그리고 Shiprocket 주문 API 호출을 제공합니다.
//!
//! # Features
//!
//! - **세션 관리**: 액세스/리프레시 JWT 발급, 쿠키 기반 세션
//! - **토큰 폐기**: 로그아웃된 액세스 토큰을 남은 수명 동안 Redis에 기록
//! - **계정 관리**: multipart 회원가입, 프로필 조회/수정
//! - **배송 연동**: Shiprocket 토큰 캐싱과 단일 재인증
//! - **MongoDB**: 사용자 데이터 영구 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthMiddleware  │ ← 토큰 검증 + 폐기 목록 확인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답, 쿠키 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← ServiceRegistry로 조립
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / RevocationLedger
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use shopfront_backend::core::registry::ServiceRegistry;
//!
//! let registry = ServiceRegistry::initialize(database, redis).await?;
//! let outcome = registry.sessions.login(Some("alice"), "pw123").await?;
//! println!("{}", outcome.tokens.access_token);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities   - MongoDB에 저장되는 계정 엔티티
//! ├── DTOs       - 요청/응답 계약, 응답 봉투
//! └── Models     - JWT 클레임, 인증된 요청 주체
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```

pub mod entities;
pub mod dto;
pub mod models;

//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, CORS, 비밀번호 해싱 설정
//! - [`auth_config`] - JWT, Shiprocket, 미디어 업로드 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8000"
//! export CORS_ORIGIN="https://shop.example.com,http://localhost:3000"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="shopfront"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # JWT 설정
//! export ACCESS_TOKEN_SECRET="..."
//! export ACCESS_TOKEN_EXPIRY="1d"
//! export REFRESH_TOKEN_SECRET="..."
//! export REFRESH_TOKEN_EXPIRY="10d"
//!
//! # 외부 연동
//! export SHIPROCKET_EMAIL="ops@example.com"
//! export SHIPROCKET_PASSWORD="..."
//! export SHIPROCKET_API_BASE="https://apiv2.shiprocket.in/v1/external"
//! export SHIPROCKET_TIMEOUT_SECS="15"
//! export CLOUDINARY_CLOUD_NAME="..."
//! export CLOUDINARY_UPLOAD_PRESET="..."
//!
//! # 선택
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 TTL 기반 키-값 저장소를 제공합니다.
//! 로그아웃된 액세스 토큰의 블랙리스트가 이 계층에 저장됩니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

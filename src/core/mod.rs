//! 애플리케이션 조립 계층
//!
//! - [`registry`] - 서비스 그래프 구성 및 공유

pub mod registry;

pub use registry::*;

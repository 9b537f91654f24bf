//! # Authentication Configuration Module
//!
//! JWT 토큰, 외부 배송 API(Shiprocket), 미디어 업로드 관련 설정을 관리합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export ACCESS_TOKEN_SECRET="access-secret"
//! export ACCESS_TOKEN_EXPIRY="1d"
//! export REFRESH_TOKEN_SECRET="refresh-secret"
//! export REFRESH_TOKEN_EXPIRY="10d"
//! ```
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키를 사용해야 합니다.
//!
//! ### Shiprocket 설정
//! ```bash
//! export SHIPROCKET_EMAIL="ops@example.com"
//! export SHIPROCKET_PASSWORD="..."
//! export SHIPROCKET_API_BASE="https://apiv2.shiprocket.in/v1/external"
//! export SHIPROCKET_TIMEOUT_SECS="15"
//! ```

use std::env;
use chrono::Duration;
use crate::config::Environment;
use crate::errors::AppError;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 액세스 토큰 서명 비밀키 (`ACCESS_TOKEN_SECRET`)
    pub fn access_secret() -> Result<String, AppError> {
        Self::secret("ACCESS_TOKEN_SECRET")
    }

    /// 리프레시 토큰 서명 비밀키 (`REFRESH_TOKEN_SECRET`)
    pub fn refresh_secret() -> Result<String, AppError> {
        Self::secret("REFRESH_TOKEN_SECRET")
    }

    /// 액세스 토큰 유효 기간 (`ACCESS_TOKEN_EXPIRY`, 기본값 1시간)
    pub fn access_expiry() -> Duration {
        Self::expiry("ACCESS_TOKEN_EXPIRY", Duration::hours(1))
    }

    /// 리프레시 토큰 유효 기간 (`REFRESH_TOKEN_EXPIRY`, 기본값 10일)
    pub fn refresh_expiry() -> Duration {
        Self::expiry("REFRESH_TOKEN_EXPIRY", Duration::days(10))
    }

    fn expiry(var: &str, default: Duration) -> Duration {
        match env::var(var) {
            Ok(raw) => parse_duration(&raw).unwrap_or_else(|| {
                log::warn!("{} 값을 해석할 수 없습니다 ({}). 기본값 사용", var, raw);
                default
            }),
            Err(_) => default,
        }
    }

    fn secret(var: &str) -> Result<String, AppError> {
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ if Environment::current().allows_insecure_defaults() => {
                log::warn!("{}가 설정되지 않아 개발용 비밀키를 사용합니다", var);
                Ok(format!("dev-only-{}", var.to_lowercase()))
            }
            _ => Err(AppError::InternalError(format!("{} must be set", var))),
        }
    }
}

/// `15m`, `1h`, `1d`, `10d`, `30s` 또는 초 단위 숫자를 기간으로 변환합니다.
///
/// 음수, 해석할 수 없는 값, `chrono` 표현 범위를 넘는 값은 `None`을 반환합니다.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let split_at = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split_at);
    let amount: i64 = number.parse().ok()?;

    // 표현 범위를 넘는 값은 None
    match unit.trim() {
        "" | "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => None,
    }
}

/// Shiprocket 외부 배송 API 설정
pub struct ShiprocketConfig;

impl ShiprocketConfig {
    /// 인증용 계정 이메일 (`SHIPROCKET_EMAIL`)
    pub fn email() -> String {
        env::var("SHIPROCKET_EMAIL").unwrap_or_default()
    }

    /// 인증용 계정 비밀번호 (`SHIPROCKET_PASSWORD`)
    pub fn password() -> String {
        env::var("SHIPROCKET_PASSWORD").unwrap_or_default()
    }

    /// API 기본 URL (끝의 `/` 제거)
    pub fn api_base() -> String {
        env::var("SHIPROCKET_API_BASE")
            .unwrap_or_else(|_| "https://apiv2.shiprocket.in/v1/external".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 외부 호출 타임아웃 (`SHIPROCKET_TIMEOUT_SECS`, 기본값 15초)
    pub fn timeout() -> std::time::Duration {
        let secs = env::var("SHIPROCKET_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(15);
        std::time::Duration::from_secs(secs)
    }
}

/// 미디어(아바타, 커버 이미지) 업로드 설정
pub struct MediaConfig;

impl MediaConfig {
    /// Cloudinary 클라우드 이름 (`CLOUDINARY_CLOUD_NAME`)
    pub fn cloud_name() -> String {
        env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default()
    }

    /// 서명 없는 업로드 프리셋 (`CLOUDINARY_UPLOAD_PRESET`)
    pub fn upload_preset() -> String {
        env::var("CLOUDINARY_UPLOAD_PRESET").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("15m"), Some(Duration::minutes(15)));
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("10d"), Some(Duration::days(10)));
        assert_eq!(parse_duration("2w"), Some(Duration::weeks(2)));
        assert_eq!(parse_duration("3600"), Some(Duration::seconds(3600)));
        assert_eq!(parse_duration(" 30s "), Some(Duration::seconds(30)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("d"), None);
        assert_eq!(parse_duration("-5m"), None);
        assert_eq!(parse_duration("5 years"), None);
    }

    #[test]
    fn test_parse_duration_out_of_range_is_rejected() {
        assert_eq!(parse_duration("999999999999d"), None);
        assert_eq!(parse_duration("99999999999999w"), None);
        assert_eq!(parse_duration("99999999999999999999"), None);
        assert!(parse_duration("99999999999d").is_some());
    }
}

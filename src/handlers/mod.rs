//! HTTP 핸들러 모듈
//!
//! - [`auth`] - 로그인, 로그아웃, 토큰 갱신, 비밀번호 변경
//! - [`users`] - 회원가입, 현재 사용자, 계정 정보 수정
//! - [`shipping`] - Shiprocket 주문 프록시
//!
//! 세션 토큰은 `httpOnly`, `secure`, `SameSite=None` 쿠키로 내려갑니다.

use actix_web::cookie::{Cookie, SameSite};

pub mod auth;
pub mod users;
pub mod shipping;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// 세션 토큰 쿠키 생성
pub fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish()
}

/// 같은 속성을 가진 삭제용 쿠키 (만료 시각이 과거)
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(ACCESS_TOKEN_COOKIE, "tok".to_string());
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn test_removal_cookie_is_empty_and_expired() {
        let cookie = removal_cookie(REFRESH_TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}

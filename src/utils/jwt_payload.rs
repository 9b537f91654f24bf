//! 서명 검증 없이 JWT 페이로드를 읽는 도구
//!
//! 블랙리스트 TTL 계산이나 외부 API 토큰의 만료 확인처럼
//! 권한 판단에 쓰이지 않는 곳에서만 사용합니다.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize};

/// JWT 페이로드를 서명 확인 없이 역직렬화합니다.
///
/// 세 부분으로 나뉘지 않거나 base64/JSON 해석에 실패하면 `None`.
pub fn decode_unverified<T: DeserializeOwned>(token: &str) -> Option<T> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: i64,
}

/// 페이로드의 `exp` 클레임 (Unix timestamp)
pub fn unverified_expiry(token: &str) -> Option<i64> {
    decode_unverified::<ExpiryClaim>(token).map(|claim| claim.exp)
}

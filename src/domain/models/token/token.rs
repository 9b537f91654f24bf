//! JWT 클레임 구조체
//!
//! 액세스/리프레시 토큰의 페이로드를 정의합니다.
//! 두 토큰은 서로 다른 비밀키로 서명되므로 한쪽 토큰이 다른 쪽 검증을 통과할 수 없습니다.

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// 보호된 엔드포인트가 DB 조회 없이 프로필 정보를 쓸 수 있도록
/// 사용자명과 이름까지 포함합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 사용자 ID (ObjectId hex)
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// 토큰 고유 ID (UUID v4)
    pub jti: String,
    /// 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// `jti` 덕분에 같은 초에 발급된 두 토큰도 서로 다른 문자열이 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인 시 함께 발급되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

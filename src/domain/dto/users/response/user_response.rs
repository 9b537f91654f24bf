use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::users::user::{Role, User};

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 리프레시 토큰 필드가 구조적으로 존재하지 않습니다.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub role: Role,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn to_chrono(value: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            full_name,
            avatar,
            cover_image,
            role,
            approved,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            full_name,
            avatar,
            cover_image,
            role,
            approved,
            created_at: to_chrono(created_at),
            updated_at: to_chrono(updated_at),
        }
    }
}

/// 로그인 응답 DTO
///
/// 토큰은 httpOnly 쿠키로만 내려가며 본문에는 프로필만 담깁니다.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
}

/// 액세스 토큰 갱신 응답 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::{NewAccount, PasswordHash};
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_response_never_contains_secrets() {
        let account = NewAccount::new("alice", "alice@x.com", "Alice", "https://cdn/a.png".into(), None).unwrap();
        let mut user = User::new_customer(account, PasswordHash::from_plaintext("pw123", 4).unwrap());
        user.id = Some(ObjectId::new());
        user.refresh_token = Some("refresh-token-value".into());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("refreshToken"));
        assert_eq!(object["username"], "alice");
        assert_eq!(object["fullName"], "Alice");
        assert_eq!(object["role"], "customer");
        assert!(!object.contains_key("coverImage"));
    }
}

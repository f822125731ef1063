//! HTTP Request/Response Types
//!
//! HTTP API のリクエストとレスポンス

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// ユーザーのレスポンス表現
///
/// パスワードは含めない。日時はUnix秒。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserReply {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub disabled: bool,
    pub create_time: i64,
    pub update_time: i64,
}

impl From<User> for UserReply {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            disabled: user.disabled,
            create_time: user.create_time.timestamp(),
            update_time: user.update_time.timestamp(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListUsersReply {
    pub users: Vec<UserReply>,
}

/// 空のレスポンス（`{}`）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyReply {}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetUserPasswordRequest {
    pub id: i64,
    pub password: String,
}

/// 有効化/無効化のリクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdRequest {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListUsersQuery {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BasicAuthBody {
    pub username: String,
    pub password: String,
}

/// 認証リクエスト
///
/// 認証方式は現状 `basic_auth` のみ。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthenticateRequest {
    #[serde(default, alias = "basicAuth")]
    pub basic_auth: Option<BasicAuthBody>,
}

//! HTTP Error Mapping
//!
//! ドメインエラーをHTTPレスポンスに変換

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{AuthError, DomainError};

pub const REASON_USER_ALREADY_EXISTED: &str = "USER_ALREADY_EXISTED";
pub const REASON_USER_NOT_FOUND: &str = "USER_NOT_FOUND";
pub const REASON_MISMATCH_USERNAME_PASSWORD: &str = "MISMATCH_USERNAME_PASSWORD";
pub const REASON_USER_DISABLED: &str = "USER_DISABLED";
pub const REASON_INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const REASON_INVALID_AUTH_METHOD: &str = "INVALID_AUTH_METHOD";
pub const REASON_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const REASON_INTERNAL: &str = "INTERNAL";

/// エラーレスポンスのボディ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: u16,
    pub reason: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub reason: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, reason: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            reason,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, REASON_INVALID_ARGUMENT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, REASON_INTERNAL, message)
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            REASON_USER_NOT_FOUND,
            format!("user {} not found", id),
        )
    }

    pub fn user_already_existed(username: &str) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            REASON_USER_ALREADY_EXISTED,
            format!("user {} already existed", username),
        )
    }

    /// NotFound を指定したIDのエラーに置き換える
    pub fn for_user(err: DomainError, id: i64) -> Self {
        match err {
            DomainError::NotFound => Self::user_not_found(id),
            other => other.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.status.as_u16(),
            reason: self.reason.to_string(),
            message: self.message,
        });

        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Self::new(
                StatusCode::NOT_FOUND,
                REASON_USER_NOT_FOUND,
                "resource not found",
            ),
            DomainError::AlreadyExists => Self::new(
                StatusCode::CONFLICT,
                REASON_USER_ALREADY_EXISTED,
                "resource already exists",
            ),
            DomainError::InvalidArgument(msg) => Self::bad_request(msg),
            DomainError::Storage(e) => {
                error!("storage operation failed: {:#}", e);
                Self::internal("storage operation failed")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MismatchUsernamePassword => Self::new(
                StatusCode::UNAUTHORIZED,
                REASON_MISMATCH_USERNAME_PASSWORD,
                "mismatch password",
            ),
            AuthError::UserDisabled => Self::new(
                StatusCode::FORBIDDEN,
                REASON_USER_DISABLED,
                "user is disabled",
            ),
            AuthError::Domain(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            rejection.status(),
            REASON_INVALID_ARGUMENT,
            rejection.body_text(),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

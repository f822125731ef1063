//! # Domain Errors
//!
//! ドメイン層のエラー定義

use thiserror::Error;

/// ドメインエラー
///
/// Repository と Use Case の境界で使う。ストレージ固有のエラーは
/// Adapter層でいずれかのバリアントに変換される。
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("resource not found")]
    NotFound,

    #[error("resource already exists")]
    AlreadyExists,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// 認証エラー
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("mismatch username or password")]
    MismatchUsernamePassword,

    #[error("user is disabled")]
    UserDisabled,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

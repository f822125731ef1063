//! # User Entity
//!
//! アカウントのドメインエンティティ

use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;

/// ユーザー名の最大長
pub const MAX_USERNAME_LEN: usize = 64;

/// ユーザーエンティティ
///
/// パスワードは受け取った値のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub disabled: bool,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// ユーザー作成の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// 新しい作成入力を組み立てる
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// 入力を検証する
    ///
    /// # Errors
    ///
    /// ユーザー名が空または長すぎる場合、メールアドレスが不正な場合、
    /// パスワードが空の場合に `DomainError::InvalidArgument` を返す
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// ユーザー更新の入力
///
/// 更新で変更できるのはメールアドレスのみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: i64,
    pub email: String,
}

impl UserUpdate {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_email(&self.email)
    }
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "username must not be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::InvalidArgument(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::InvalidArgument(format!(
            "invalid email address: {}",
            email
        ))),
    }
}

/// パスワードを検証する
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.is_empty() {
        return Err(DomainError::InvalidArgument(
            "password must not be empty".to_string(),
        ));
    }
    Ok(())
}

//! # User Repository Trait
//!
//! ユーザーの永続化を抽象化

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User, UserUpdate};
use crate::domain::errors::DomainError;

/// ユーザーリポジトリ
///
/// 存在しないIDを指定した操作はすべて `DomainError::NotFound` を返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成する
    ///
    /// # Errors
    ///
    /// ユーザー名が既に使われている場合に `DomainError::AlreadyExists` を返す
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// メールアドレスを更新し、更新後のユーザーを返す
    async fn update(&self, update: UserUpdate) -> Result<User, DomainError>;

    /// ユーザーを削除する
    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    /// IDでユーザーを取得する
    async fn get(&self, id: i64) -> Result<User, DomainError>;

    /// ユーザー名でユーザーを取得する
    async fn get_by_username(&self, username: &str) -> Result<User, DomainError>;

    /// ユーザーを有効化する
    async fn enable(&self, id: i64) -> Result<(), DomainError>;

    /// ユーザーを無効化する
    async fn disable(&self, id: i64) -> Result<(), DomainError>;

    /// ユーザー一覧をID昇順で返す
    ///
    /// # Arguments
    ///
    /// * `offset` - 先頭からスキップする件数
    /// * `limit` - 返す最大件数
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, DomainError>;

    /// パスワードを設定する
    async fn set_password(&self, id: i64, password: &str) -> Result<(), DomainError>;
}

//! SQL User Repository Implementation
//!
//! UserRepositoryのSQLite実装

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sqlx::FromRow;

use crate::adapter::database::{map_sqlx_error, Data};
use crate::domain::entities::user::{NewUser, User, UserUpdate};
use crate::domain::errors::DomainError;
use crate::domain::repositories::user_repository::UserRepository;

const USER_COLUMNS: &str = "id, username, email, password, disabled, create_time, update_time";

/// usersテーブルの行（永続化用の内部表現）
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    disabled: bool,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password: row.password,
            disabled: row.disabled,
            create_time: row.create_time,
            update_time: row.update_time,
        }
    }
}

/// SQLiteベースのユーザーリポジトリ
pub struct SqlUserRepository {
    data: Data,
}

impl SqlUserRepository {
    /// 新しいリポジトリを作成
    pub fn new(data: Data) -> Self {
        Self { data }
    }

    /// 1行を更新し、対象が存在しなければ NotFound を返す
    async fn execute_one(&self, sql: &str, id: i64, bind: Option<&str>) -> Result<(), DomainError> {
        let mut conn = self.data.conn().await?;
        let mut query = sqlx::query(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let result = query
            .bind(Utc::now())
            .bind(id)
            .execute(conn.executor()?)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn set_disabled(&self, id: i64, disabled: bool) -> Result<(), DomainError> {
        let sql = if disabled {
            "UPDATE users SET disabled = TRUE, update_time = ? WHERE id = ?"
        } else {
            "UPDATE users SET disabled = FALSE, update_time = ? WHERE id = ?"
        };
        self.execute_one(sql, id, None).await?;
        debug!("User {} disabled={}", id, disabled);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();
        let mut conn = self.data.conn().await?;
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (username, email, password, disabled, create_time, update_time) \
             VALUES (?, ?, ?, FALSE, ?, ?) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(now)
        .bind(now)
        .fetch_one(conn.executor()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update(&self, update: UserUpdate) -> Result<User, DomainError> {
        let mut conn = self.data.conn().await?;
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET email = ?, update_time = ? WHERE id = ? RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&update.email)
        .bind(Utc::now())
        .bind(update.id)
        .fetch_optional(conn.executor()?)
        .await
        .map_err(map_sqlx_error)?;

        row.map(User::from).ok_or(DomainError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut conn = self.data.conn().await?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(conn.executor()?)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<User, DomainError> {
        let mut conn = self.data.conn().await?;
        let row: UserRow = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = ?",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_one(conn.executor()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        let mut conn = self.data.conn().await?;
        let row: UserRow = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_one(conn.executor()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn enable(&self, id: i64) -> Result<(), DomainError> {
        self.set_disabled(id, false).await
    }

    async fn disable(&self, id: i64) -> Result<(), DomainError> {
        self.set_disabled(id, true).await
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut conn = self.data.conn().await?;
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(conn.executor()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn set_password(&self, id: i64, password: &str) -> Result<(), DomainError> {
        self.execute_one(
            "UPDATE users SET password = ?, update_time = ? WHERE id = ?",
            id,
            Some(password),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::database::tests::memory_data;
    use crate::domain::repositories::transaction::Transaction;

    fn default_user() -> NewUser {
        NewUser::new("liubo", "findliubo@163.com", "Admin@169+-")
    }

    async fn repo() -> SqlUserRepository {
        SqlUserRepository::new(memory_data().await)
    }

    #[tokio::test]
    async fn test_create() {
        let repo = repo().await;

        let user = repo.create(default_user()).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "liubo");
        assert_eq!(user.email, "findliubo@163.com");
        assert_eq!(user.password, "Admin@169+-");
        assert!(!user.disabled);
        assert_eq!(user.create_time, user.update_time);
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let repo = repo().await;
        repo.create(default_user()).await.unwrap();

        let result = repo
            .create(NewUser::new("liubo", "other@163.com", "x"))
            .await;

        assert!(matches!(result, Err(DomainError::AlreadyExists)));
        assert_eq!(repo.list(0, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let created = repo.create(default_user()).await.unwrap();

        let updated = repo
            .update(UserUpdate::new(created.id, "findliubo@361.com"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, "liubo");
        assert_eq!(updated.email, "findliubo@361.com");
        assert_eq!(updated.password, "Admin@169+-");
        assert_eq!(updated.create_time, created.create_time);
        assert!(updated.update_time >= created.update_time);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let repo = repo().await;

        let result = repo.update(UserUpdate::new(99, "a@b.c")).await;

        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo.create(default_user()).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(matches!(
            repo.get(created.id).await,
            Err(DomainError::NotFound)
        ));
        assert!(matches!(
            repo.delete(created.id).await,
            Err(DomainError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_and_get_by_username() {
        let repo = repo().await;
        let created = repo.create(default_user()).await.unwrap();

        assert_eq!(repo.get(created.id).await.unwrap(), created);
        assert_eq!(repo.get_by_username("liubo").await.unwrap(), created);
        assert!(matches!(
            repo.get_by_username("nobody").await,
            Err(DomainError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_set_password() {
        let repo = repo().await;
        let created = repo.create(default_user()).await.unwrap();

        repo.set_password(created.id, "Admin@169--").await.unwrap();

        let user = repo.get(created.id).await.unwrap();
        assert_eq!(user.password, "Admin@169--");
        assert!(matches!(
            repo.set_password(99, "x").await,
            Err(DomainError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_enable_disable() {
        let repo = repo().await;
        let created = repo.create(default_user()).await.unwrap();

        repo.disable(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().disabled);

        repo.enable(created.id).await.unwrap();
        assert!(!repo.get(created.id).await.unwrap().disabled);

        assert!(matches!(repo.disable(99).await, Err(DomainError::NotFound)));
        assert!(matches!(repo.enable(99).await, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_offset_limit() {
        let repo = repo().await;
        for name in ["a", "b", "c", "d", "e"] {
            repo.create(NewUser::new(name, format!("{}@163.com", name), "pw"))
                .await
                .unwrap();
        }

        let users = repo.list(1, 2).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "b");
        assert_eq!(users[1].username, "c");
        assert!(repo.list(10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_password_inside_transaction_rolls_back() {
        let data = memory_data().await;
        let repo = SqlUserRepository::new(data.clone());
        let created = repo.create(default_user()).await.unwrap();

        let result: Result<(), DomainError> = data
            .with_tx(|| async {
                repo.set_password(created.id, "Admin@169--").await?;
                Err(DomainError::InvalidArgument("abort".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repo.get(created.id).await.unwrap().password, "Admin@169+-");
    }

    #[test]
    fn test_user_from_row() {
        let now = Utc::now();
        let row = UserRow {
            id: 1,
            username: "liubo".to_string(),
            email: "findliubo@163.com".to_string(),
            password: "Admin@169+-".to_string(),
            disabled: true,
            create_time: now,
            update_time: now,
        };

        let user: User = row.into();

        assert_eq!(
            user,
            User {
                id: 1,
                username: "liubo".to_string(),
                email: "findliubo@163.com".to_string(),
                password: "Admin@169+-".to_string(),
                disabled: true,
                create_time: now,
                update_time: now,
            }
        );
    }
}

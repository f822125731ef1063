//! # Account Use Case
//!
//! ユーザー管理ユースケース

use std::sync::Arc;

use crate::application::dto::pagination::Pagination;
use crate::domain::entities::user::{validate_password, NewUser, User, UserUpdate};
use crate::domain::errors::DomainError;
use crate::domain::repositories::transaction::Transaction;
use crate::domain::repositories::user_repository::UserRepository;

/// ユーザー管理ユースケース
///
/// 入力を検証したうえで UserRepository に委譲する。
pub struct AccountUseCase<T: Transaction, R: UserRepository> {
    transaction: Arc<T>,
    user_repository: Arc<R>,
}

impl<T: Transaction, R: UserRepository> AccountUseCase<T, R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `transaction` - トランザクション境界
    /// * `user_repository` - ユーザーリポジトリ
    pub fn new(transaction: Arc<T>, user_repository: Arc<R>) -> Self {
        Self {
            transaction,
            user_repository,
        }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        user.validate()?;
        self.user_repository.create(user).await
    }

    pub async fn update_user(&self, update: UserUpdate) -> Result<User, DomainError> {
        update.validate()?;
        self.user_repository.update(update).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        self.user_repository.delete(id).await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        self.user_repository.get(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.user_repository.get_by_username(username).await
    }

    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>, DomainError> {
        self.user_repository
            .list(page.offset(), page.limit())
            .await
    }

    pub async fn enable_user(&self, id: i64) -> Result<(), DomainError> {
        self.user_repository.enable(id).await
    }

    pub async fn disable_user(&self, id: i64) -> Result<(), DomainError> {
        self.user_repository.disable(id).await
    }

    /// パスワードを設定する
    ///
    /// トランザクション内で実行する。
    ///
    /// # Errors
    ///
    /// パスワードが空の場合は `DomainError::InvalidArgument`、
    /// ユーザーが存在しない場合は `DomainError::NotFound` を返す
    pub async fn set_user_password(&self, id: i64, password: &str) -> Result<(), DomainError> {
        validate_password(password)?;
        let repo = &self.user_repository;
        self.transaction
            .with_tx(|| async move { repo.set_password(id, password).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use mockall::predicate::eq;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::repositories::user_repository::MockUserRepository;

    #[derive(Default)]
    struct FakeTransaction {
        commits: AtomicUsize,
        rollbacks: AtomicUsize,
    }

    #[async_trait]
    impl Transaction for FakeTransaction {
        async fn with_tx<T, F, Fut>(&self, f: F) -> Result<T, DomainError>
        where
            T: Send,
            F: FnOnce() -> Fut + Send,
            Fut: Future<Output = Result<T, DomainError>> + Send,
        {
            let result = f().await;
            if result.is_ok() {
                self.commits.fetch_add(1, Ordering::SeqCst);
            } else {
                self.rollbacks.fetch_add(1, Ordering::SeqCst);
            }
            result
        }
    }

    fn create_test_user(id: i64, username: &str) -> User {
        let now = chrono::Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap();
        User {
            id,
            username: username.to_string(),
            email: "findliubo@163.com".to_string(),
            password: "Admin@169+-".to_string(),
            disabled: false,
            create_time: now,
            update_time: now,
        }
    }

    fn use_case(
        repo: MockUserRepository,
    ) -> (
        AccountUseCase<FakeTransaction, MockUserRepository>,
        Arc<FakeTransaction>,
    ) {
        let tx = Arc::new(FakeTransaction::default());
        (AccountUseCase::new(tx.clone(), Arc::new(repo)), tx)
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|user| user.username == "liubo")
            .times(1)
            .returning(|user| Ok(create_test_user(1, &user.username)));
        let (use_case, _) = use_case(repo);

        let user = use_case
            .create_user(NewUser::new("liubo", "findliubo@163.com", "Admin@169+-"))
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "liubo");
    }

    #[tokio::test]
    async fn test_create_user_invalid_input_skips_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();
        let (use_case, _) = use_case(repo);

        let result = use_case
            .create_user(NewUser::new("", "findliubo@163.com", "Admin@169+-"))
            .await;

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_user_already_exists() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(DomainError::AlreadyExists));
        let (use_case, _) = use_case(repo);

        let result = use_case
            .create_user(NewUser::new("liubo", "findliubo@163.com", "Admin@169+-"))
            .await;

        assert!(matches!(result, Err(DomainError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_update_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq(UserUpdate::new(1, "findliubo@361.com")))
            .times(1)
            .returning(|update| {
                let mut user = create_test_user(update.id, "liubo");
                user.email = update.email;
                Ok(user)
            });
        let (use_case, _) = use_case(repo);

        let user = use_case
            .update_user(UserUpdate::new(1, "findliubo@361.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "findliubo@361.com");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .with(eq(42))
            .returning(|_| Err(DomainError::NotFound));
        let (use_case, _) = use_case(repo);

        let result = use_case.get_user(42).await;

        assert!(matches!(result, Err(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_enable_disable_forward_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(()));
        repo.expect_enable().with(eq(4)).times(1).returning(|_| Ok(()));
        repo.expect_disable().with(eq(5)).times(1).returning(|_| Ok(()));
        let (use_case, _) = use_case(repo);

        assert!(use_case.delete_user(3).await.is_ok());
        assert!(use_case.enable_user(4).await.is_ok());
        assert!(use_case.disable_user(5).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_users_normalizes_pagination() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .with(eq(0), eq(20))
            .times(1)
            .returning(|_, _| Ok(vec![create_test_user(1, "liubo"), create_test_user(2, "alice")]));
        let (use_case, _) = use_case(repo);

        let users = use_case.list_users(Pagination::new(-1, 0)).await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username, "alice");
    }

    #[tokio::test]
    async fn test_get_user_by_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .withf(|username| username == "liubo")
            .returning(|username| Ok(create_test_user(1, username)));
        let (use_case, _) = use_case(repo);

        let user = use_case.get_user_by_username("liubo").await.unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_set_user_password_commits() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_password()
            .withf(|id, password| *id == 1 && password == "Admin@169--")
            .times(1)
            .returning(|_, _| Ok(()));
        let (use_case, tx) = use_case(repo);

        use_case.set_user_password(1, "Admin@169--").await.unwrap();

        assert_eq!(tx.commits.load(Ordering::SeqCst), 1);
        assert_eq!(tx.rollbacks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_set_user_password_rolls_back_on_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_password()
            .returning(|_, _| Err(DomainError::NotFound));
        let (use_case, tx) = use_case(repo);

        let result = use_case.set_user_password(9, "Admin@169--").await;

        assert!(matches!(result, Err(DomainError::NotFound)));
        assert_eq!(tx.commits.load(Ordering::SeqCst), 0);
        assert_eq!(tx.rollbacks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_user_password_empty_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_password().never();
        let (use_case, tx) = use_case(repo);

        let result = use_case.set_user_password(1, "").await;

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert_eq!(tx.commits.load(Ordering::SeqCst), 0);
    }
}

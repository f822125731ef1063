//! # Authenticate Use Case
//!
//! ユーザー名とパスワードによる認証ユースケース

use std::sync::Arc;

use crate::application::dto::basic_auth::BasicAuth;
use crate::domain::entities::user::User;
use crate::domain::errors::{AuthError, DomainError};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::credential::CredentialService;

/// 認証ユースケース
pub struct AuthenticateUseCase<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    /// 認証を実行し、認証されたユーザーを返す
    ///
    /// 存在しないユーザー名はパスワード不一致と区別しない。
    ///
    /// # Errors
    ///
    /// - ユーザーが存在しない、またはパスワードが一致しない場合は `AuthError::MismatchUsernamePassword`
    /// - ユーザーが無効化されている場合は `AuthError::UserDisabled`
    /// - ストレージエラーは `AuthError::Domain`
    pub async fn execute(&self, auth: &BasicAuth) -> Result<User, AuthError> {
        let user = match self.user_repository.get_by_username(&auth.username).await {
            Ok(user) => user,
            Err(DomainError::NotFound) => return Err(AuthError::MismatchUsernamePassword),
            Err(e) => return Err(e.into()),
        };

        CredentialService::verify(&user, &auth.password)?;

        Ok(user)
    }
}

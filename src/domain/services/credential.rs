//! # Credential Service
//!
//! 認証情報の検証サービス

use crate::domain::entities::user::User;
use crate::domain::errors::AuthError;

/// 認証情報検証サービス
pub struct CredentialService;

impl CredentialService {
    /// ユーザーとパスワードの組み合わせを検証する
    ///
    /// 無効化されたユーザーは、パスワードが正しくても拒否する。
    ///
    /// # Errors
    ///
    /// - 無効化されている場合は `AuthError::UserDisabled`
    /// - パスワードが一致しない場合は `AuthError::MismatchUsernamePassword`
    pub fn verify(user: &User, password: &str) -> Result<(), AuthError> {
        if user.disabled {
            return Err(AuthError::UserDisabled);
        }
        if user.password != password {
            return Err(AuthError::MismatchUsernamePassword);
        }
        Ok(())
    }
}

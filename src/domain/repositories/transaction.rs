//! # Transaction Trait
//!
//! データベーストランザクションの境界を抽象化

use async_trait::async_trait;
use std::future::Future;

use crate::domain::errors::DomainError;

/// トランザクション
///
/// `with_tx` に渡したコールバックの中で呼ばれた Repository 操作は、
/// すべて同じトランザクションで実行される。
#[async_trait]
pub trait Transaction: Send + Sync {
    /// コールバックをトランザクション内で実行する
    ///
    /// コールバックが `Ok` を返せばコミット、`Err` を返すかパニックした場合は
    /// ロールバックする。既にトランザクション内で呼ばれた場合は外側の
    /// トランザクションに参加する。
    ///
    /// # Errors
    ///
    /// コールバックのエラー、またはトランザクションの開始・コミット・
    /// ロールバックに失敗した場合のエラーを返す
    async fn with_tx<T, F, Fut>(&self, f: F) -> Result<T, DomainError>
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send;
}

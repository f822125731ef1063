//! Database
//!
//! SQLiteコネクションプールとトランザクション管理

mod schema;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::{debug, error, info, LevelFilter};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{ConnectOptions, Sqlite, SqliteConnection};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::adapter::config::{expand_path, DatabaseConfig};
use crate::domain::errors::DomainError;
use crate::domain::repositories::transaction::Transaction;

type SqliteTx = sqlx::Transaction<'static, Sqlite>;
type TxHandle = Arc<Mutex<Option<SqliteTx>>>;

tokio::task_local! {
    /// 実行中タスクが開いているトランザクション
    static CURRENT_TX: TxHandle;
}

/// sqlxのエラーをドメインエラーに変換する
pub fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::RowNotFound = err {
        return DomainError::NotFound;
    }
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::AlreadyExists;
        }
    }
    DomainError::Storage(err.into())
}

/// sqlx の接続URLのうちパス部分だけチルダ展開する
fn expand_source(source: &str) -> String {
    for scheme in ["sqlite://", "sqlite:"] {
        if let Some(rest) = source.strip_prefix(scheme) {
            return format!("{}{}", scheme, expand_path(rest));
        }
    }
    expand_path(source)
}

fn is_memory_source(source: &str) -> bool {
    source.contains(":memory:") || source.contains("mode=memory")
}

/// Repository が使うコネクション
///
/// トランザクション中はそのトランザクションを、それ以外はプールから
/// 取得したコネクションを保持する。同じタスク内で2つ同時に保持すると
/// トランザクションのロック待ちで止まるため、操作ごとに取得して手放すこと。
pub enum DbConn {
    Pooled(PoolConnection<Sqlite>),
    Tx(OwnedMutexGuard<Option<SqliteTx>>),
}

impl DbConn {
    /// クエリの実行先を返す
    pub fn executor(&mut self) -> Result<&mut SqliteConnection, DomainError> {
        match self {
            DbConn::Pooled(conn) => Ok(&mut **conn),
            DbConn::Tx(guard) => guard
                .as_deref_mut()
                .ok_or_else(|| DomainError::Storage(anyhow!("transaction already finished"))),
        }
    }
}

/// データベースハンドル
#[derive(Debug, Clone)]
pub struct Data {
    pool: SqlitePool,
}

impl Data {
    /// 接続してスキーマを作成する
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let source = expand_source(&config.source);
        let options = SqliteConnectOptions::from_str(&source)
            .with_context(|| format!("Invalid database source: {}", source))?
            .create_if_missing(true)
            .log_statements(LevelFilter::Debug);

        // インメモリDBはコネクションごとに別物になるため1本に固定し、切断させない
        let mut pool_options = SqlitePoolOptions::new();
        if is_memory_source(&source) {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        } else {
            pool_options = pool_options.max_connections(config.max_connections.max(1));
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", source))?;

        let data = Self { pool };
        data.migrate().await?;

        info!("Database ready: {}", source);
        Ok(data)
    }

    /// スキーマを作成する（既存のテーブルはそのまま）
    pub async fn migrate(&self) -> anyhow::Result<()> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("Failed creating schema resources")?;
        }
        Ok(())
    }

    /// 現在のタスクで使うコネクションを取得する
    pub async fn conn(&self) -> Result<DbConn, DomainError> {
        if let Ok(handle) = CURRENT_TX.try_with(|tx| tx.clone()) {
            return Ok(DbConn::Tx(handle.lock_owned().await));
        }
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(DbConn::Pooled(conn))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        info!("closing the data resources");
        self.pool.close().await;
    }
}

#[async_trait]
impl Transaction for Data {
    async fn with_tx<T, F, Fut>(&self, f: F) -> Result<T, DomainError>
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        if CURRENT_TX.try_with(|_| ()).is_ok() {
            return f().await;
        }

        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let handle: TxHandle = Arc::new(Mutex::new(Some(tx)));

        // パニック時は handle ごと破棄され、未コミットのトランザクションはロールバックされる
        let result = CURRENT_TX
            .scope(handle.clone(), async move { f().await })
            .await;

        let tx = handle
            .lock()
            .await
            .take()
            .ok_or_else(|| DomainError::Storage(anyhow!("transaction handle lost")))?;

        match result {
            Ok(value) => {
                tx.commit()
                    .await
                    .context("committing transaction")
                    .map_err(DomainError::Storage)?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => Err(after_rollback(err, tx.rollback().await)),
        }
    }
}

/// ロールバック結果にかかわらず、呼び出し元には元のエラーを返す
fn after_rollback(err: DomainError, rollback: Result<(), sqlx::Error>) -> DomainError {
    match rollback {
        Ok(()) => debug!("Transaction rolled back: {}", err),
        Err(rollback_err) => error!(
            "Failed to roll back transaction after {}: {}",
            err, rollback_err
        ),
    }
    err
}

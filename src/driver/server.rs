//! Server Orchestration
//!
//! 依存性の組み立てとHTTPサーバーのライフサイクル管理

use anyhow::{Context, Result};
use log::info;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::adapter::config::Config;
use crate::adapter::database::Data;

use super::http::{router, AppState};

/// Account Server
pub struct AccountServer {
    config: Config,
}

impl AccountServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// サーバーを起動し、シャットダウンシグナルを受けるまで待機する
    pub async fn run(self) -> Result<()> {
        let data = Data::connect(&self.config.data.database)
            .await
            .context("Failed to initialize data layer")?;

        let timeout = Duration::from_secs(self.config.server.http.timeout_secs);
        let app = router(AppState::new(data.clone()), timeout);

        let addr = &self.config.server.http.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("HTTP server listening on {}", addr);

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error");

        data.close().await;
        info!("HTTP server stopped");
        served
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Expands tilde in path and returns the full path
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: String,
    /// リクエストタイムアウト（秒）
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
            timeout_secs: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx の接続URL（例: `sqlite://usm.db`, `sqlite::memory:`）
    pub source: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            source: "sqlite://usm.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// env_logger のフィルタ指定（`RUST_LOG` が優先）
    pub level: String,
    /// 各ログ行の先頭に付ける文字列
    pub prefix: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            prefix: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }
}

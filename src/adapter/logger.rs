//! Logger Setup
//!
//! env_logger の初期化

use env_logger::{Builder, Env};
use std::io::Write;

use super::config::LogConfig;

/// 設定からロガービルダーを組み立てる
///
/// `RUST_LOG` が設定されていればそちらを優先する。
pub fn builder(config: &LogConfig) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));

    if let Some(prefix) = config.prefix.clone() {
        builder.format(move |buf, record| {
            writeln!(
                buf,
                "{} [{} {} {}] {}",
                prefix,
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    }

    builder
}

/// グローバルロガーを初期化する
///
/// 既に初期化済みの場合は何もしない。
pub fn init(config: &LogConfig) {
    if builder(config).try_init().is_err() {
        log::debug!("Logger already initialized, skipping");
    }
}

//! Adapter Layer
//!
//! 外部システム（SQLite, 設定ファイル, ロガー）との統合

pub mod config;
pub mod database;
pub mod logger;
pub mod repositories;

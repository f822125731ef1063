//! # Driver Layer (Presentation)
//!
//! HTTP APIとCLIを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - 外部クライアントとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **http**: ルーティング、ハンドラ、エラーレスポンス
//! - **server**: サーバーのライフサイクル管理

pub mod cli;
pub mod http;
pub mod server;

pub use cli::Args;
pub use server::AccountServer;

//! # USM
//!
//! ユーザーアカウントを管理するHTTPマイクロサービス
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: ユーザーエンティティ、リポジトリ/トランザクションのトレイト、認証ルール
//! - **Application層**: アカウント管理と認証のユースケース
//! - **Adapter層**: SQLite（sqlx）、設定ファイル、ロガー
//! - **Driver層**: HTTP API、CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時にシグナル待ちなどのコードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;

//! # Domain Layer
//!
//! このモジュールはアカウント管理の核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - フレームワークに依存しない
//! - データベースやHTTPについて何も知らない
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（User, NewUser, UserUpdate）
//! - **errors**: ドメインエラー
//! - **repositories**: Repository trait と Transaction trait（インターフェース定義のみ）
//! - **services**: Domain Service（認証情報の検証）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;

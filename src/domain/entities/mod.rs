//! # Domain Entities
//!
//! ビジネスエンティティを定義するモジュール
//!
//! ## エンティティ
//!
//! - **User**: アカウントレコード
//! - **NewUser**: 作成時の入力
//! - **UserUpdate**: 更新時の入力

pub mod user;

//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AccountUseCase**: ユーザーのCRUD、有効化/無効化、パスワード設定
//! - **AuthenticateUseCase**: ユーザー名とパスワードによる認証

pub mod account;
pub mod authenticate;

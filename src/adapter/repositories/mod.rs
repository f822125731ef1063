//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod sql_user_repository;

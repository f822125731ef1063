//! # Data Transfer Objects
//!
//! ユースケースへの入力

pub mod basic_auth;
pub mod pagination;

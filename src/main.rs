//! USM - User Account Management Service
//!
//! ユーザーアカウント管理のHTTPサーバー

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use usm::adapter::config::Config;
use usm::adapter::logger;
use usm::driver::{AccountServer, Args};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    args.apply(&mut config);

    logger::init(&config.log);

    AccountServer::new(config).run().await
}

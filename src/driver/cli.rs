//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::config::Config;

/// ユーザーアカウント管理サーバー
#[derive(Parser, Debug, Clone)]
#[command(name = "usm")]
#[command(about = "User account management service", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./configs/config.json")]
    pub config: String,

    /// Override the HTTP listen address
    #[arg(long)]
    pub addr: Option<String>,

    /// Override the database source
    #[arg(long)]
    pub database: Option<String>,
}

impl Args {
    /// コマンドライン指定を設定に上書きする
    pub fn apply(&self, config: &mut Config) {
        if let Some(addr) = &self.addr {
            config.server.http.addr = addr.clone();
        }
        if let Some(source) = &self.database {
            config.data.database.source = source.clone();
        }
    }
}

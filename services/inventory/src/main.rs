//! Inventory Service 入口

use anyhow::{Context, Result};
use clap::Parser;
use inventory_config::AppConfig;
use inventory_service::{cli::Cli, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 加载配置
    let config = AppConfig::load(&cli.config_dir, &cli.overrides())
        .context("Invalid configuration (host, port and cache directory are required)")?;

    // 初始化 tracing
    inventory_telemetry::init(&config.telemetry.log_level, config.wants_json_logs())
        .context("Failed to initialize tracing")?;

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    server::run(config).await
}

//! 命令行参数

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use inventory_config::ConfigOverrides;

/// 库存管理 HTTP 服务
#[derive(Debug, Parser)]
#[command(name = "inventory-service")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// 监听地址
    #[arg(short = 'h', long, value_name = "HOST")]
    pub host: Option<String>,

    /// 监听端口
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// 照片缓存目录，不存在时自动创建
    #[arg(short, long = "cache", value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// 配置文件目录
    #[arg(long, value_name = "DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// 日志级别（`RUST_LOG` 优先）
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            cache_dir: self.cache_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

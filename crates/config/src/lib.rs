//! inventory-config - 配置加载库
//!
//! 加载顺序（后者覆盖前者）：
//! `{config_dir}/default.toml` → `{config_dir}/{APP_ENV}.toml` → `INVENTORY_*` 环境变量 → 命令行参数

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 环境变量前缀，嵌套字段用 `__` 分隔，例如 `INVENTORY_SERVER__PORT`
pub const ENV_PREFIX: &str = "INVENTORY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` 形式的监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// 照片缓存目录
    pub cache_dir: PathBuf,
    /// 静态表单页面所在目录
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_app_name() -> String {
    "inventory-service".to_string()
}

/// 命令行覆盖项，`None` 表示不覆盖
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cache_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, mut figment: Figment) -> Figment {
        if let Some(host) = &self.host {
            figment = figment.merge(Serialized::default("server.host", host));
        }
        if let Some(port) = self.port {
            figment = figment.merge(Serialized::default("server.port", port));
        }
        if let Some(cache_dir) = &self.cache_dir {
            figment = figment.merge(Serialized::default("storage.cache_dir", cache_dir));
        }
        if let Some(log_level) = &self.log_level {
            figment = figment.merge(Serialized::default("telemetry.log_level", log_level));
        }
        figment
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    pub app_env: String,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// 从配置文件、环境变量和命令行覆盖项加载配置
    pub fn load(config_dir: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_dir.as_ref(), overrides).extract()?;
        Ok(config)
    }

    /// 构建分层配置源
    pub fn figment(config_dir: &Path, overrides: &ConfigOverrides) -> Figment {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let figment = Figment::new()
            .merge(Serialized::default("app_env", &env))
            .merge(Toml::file(config_dir.join("default.toml")))
            .merge(Toml::file(config_dir.join(format!("{}.toml", env))))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        overrides.apply(figment)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否使用 JSON 日志
    pub fn wants_json_logs(&self) -> bool {
        self.telemetry.json || self.is_production()
    }
}

#[cfg(test)]
mod tests;

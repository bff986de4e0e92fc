//! telemetry - 可观测性库
//!
//! 全局 subscriber 只能安装一次；重复安装返回 `TryInitError`，不会 panic。

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// `RUST_LOG` 优先，否则使用配置的日志级别
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 安装全局 subscriber，`json` 为 true 时输出 JSON 行（生产环境）
pub fn init(log_level: &str, json: bool) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter(log_level));

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    }
}

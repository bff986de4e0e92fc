//! 服务启动与优雅关闭

use std::sync::Arc;

use anyhow::{Context, Result};
use inventory_config::AppConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::api::{ApiSettings, AppState, create_router};
use crate::application::InventoryService;
use crate::infrastructure::{InMemoryInventoryRepository, PhotoStore};

/// 创建缓存目录、组装服务并监听直到收到关闭信号
pub async fn run(config: AppConfig) -> Result<()> {
    let photos = PhotoStore::prepare(&config.storage.cache_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create cache directory {}",
                config.storage.cache_dir.display()
            )
        })?;
    info!(path = %photos.root().display(), "Cache directory ready");

    let repo = Arc::new(InMemoryInventoryRepository::new());
    let service = Arc::new(InventoryService::new(repo, photos));
    let app = create_router(AppState::new(service), &ApiSettings::from(&config.storage));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Inventory service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Inventory service stopped");
    Ok(())
}

/// 等待关闭信号
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

//! 路由定义

use std::path::PathBuf;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    routing::{MethodRouter, get, post},
};
use inventory_config::StorageConfig;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::fallback::route_fallback;
use super::handlers::{self, AppState};

pub const REGISTER_FORM: &str = "RegisterForm.html";
pub const SEARCH_FORM: &str = "SearchForm.html";

/// 路由层的非业务配置
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl From<&StorageConfig> for ApiSettings {
    fn from(storage: &StorageConfig) -> Self {
        Self {
            static_dir: storage.static_dir.clone(),
            max_body_bytes: storage.max_upload_bytes,
        }
    }
}

/// 同时注册 `path` 与 `path/`
fn route_lenient(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

fn static_form(path: PathBuf) -> MethodRouter<AppState> {
    get(move |request: Request| handlers::serve_file(path.clone(), request))
}

/// 创建完整路由
pub fn create_router(state: AppState, settings: &ApiSettings) -> Router {
    let api = [
        ("/register", post(handlers::register_item)),
        ("/inventory", get(handlers::list_items)),
        (
            "/inventory/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        ),
        (
            "/inventory/{id}/photo",
            get(handlers::get_photo).put(handlers::update_photo),
        ),
        ("/search", post(handlers::search_item)),
    ];

    api.into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            route_lenient(router, path, method_router)
        })
        .route(
            &format!("/{REGISTER_FORM}"),
            static_form(settings.static_dir.join(REGISTER_FORM)),
        )
        .route(
            &format!("/{SEARCH_FORM}"),
            static_form(settings.static_dir.join(SEARCH_FORM)),
        )
        .fallback(route_fallback)
        .method_not_allowed_fallback(route_fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

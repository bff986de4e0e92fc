//! HTTP API

pub mod dto;
pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{ApiSettings, create_router};

//! 应用层

pub mod service;
pub mod views;

pub use service::{InventoryService, RegisterItem, SearchQuery};
pub use views::{ItemView, SearchResult};

//! 基础设施层

pub mod memory_repository;
pub mod photo_store;

pub use memory_repository::InMemoryInventoryRepository;
pub use photo_store::{PhotoStore, UploadedPhoto};

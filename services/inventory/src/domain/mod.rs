//! 库存领域模型

pub mod item;
pub mod repository;

pub use item::{InventoryItem, ItemId, ItemPatch, NewItem};
pub use repository::InventoryRepository;

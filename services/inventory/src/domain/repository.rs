//! Repository trait 定义

use async_trait::async_trait;
use inventory_errors::AppResult;

use super::item::{InventoryItem, ItemId, ItemPatch, NewItem};

/// 库存条目仓储
///
/// 查找与修改必须在同一次调用内原子完成；返回 `Ok(None)` 表示 ID 不存在。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// 分配下一个 ID 并追加条目
    async fn insert(&self, item: NewItem) -> AppResult<InventoryItem>;

    /// 按插入顺序返回所有条目
    async fn find_all(&self) -> AppResult<Vec<InventoryItem>>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<InventoryItem>>;

    /// 更新名称和/或描述
    async fn update_fields(&self, id: ItemId, patch: &ItemPatch) -> AppResult<Option<InventoryItem>>;

    /// 替换照片文件名
    async fn set_photo(&self, id: ItemId, photo: String) -> AppResult<Option<InventoryItem>>;

    /// 删除并返回被删除的条目
    async fn delete(&self, id: ItemId) -> AppResult<Option<InventoryItem>>;
}

//! 内存仓储实现
//!
//! 进程重启后数据丢失

use async_trait::async_trait;
use inventory_errors::AppResult;
use parking_lot::RwLock;

use crate::domain::{InventoryItem, InventoryRepository, ItemId, ItemPatch, NewItem};

struct Inner {
    items: Vec<InventoryItem>,
    next_id: u64,
}

/// 基于单把读写锁的内存仓储
pub struct InMemoryInventoryRepository {
    inner: RwLock<Inner>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn modify<F>(&self, id: ItemId, f: F) -> Option<InventoryItem>
    where
        F: FnOnce(&mut InventoryItem),
    {
        let mut inner = self.inner.write();
        let item = inner.items.iter_mut().find(|item| item.id == id)?;
        f(item);
        Some(item.clone())
    }
}

impl Default for InMemoryInventoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn insert(&self, item: NewItem) -> AppResult<InventoryItem> {
        let mut inner = self.inner.write();
        let id = ItemId(inner.next_id);
        inner.next_id += 1;

        let item = InventoryItem {
            id,
            name: item.name,
            description: item.description,
            photo: item.photo,
        };
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn find_all(&self) -> AppResult<Vec<InventoryItem>> {
        Ok(self.inner.read().items.clone())
    }

    async fn find_by_id(&self, id: ItemId) -> AppResult<Option<InventoryItem>> {
        Ok(self.inner.read().items.iter().find(|item| item.id == id).cloned())
    }

    async fn update_fields(&self, id: ItemId, patch: &ItemPatch) -> AppResult<Option<InventoryItem>> {
        Ok(self.modify(id, |item| item.apply(patch)))
    }

    async fn set_photo(&self, id: ItemId, photo: String) -> AppResult<Option<InventoryItem>> {
        Ok(self.modify(id, |item| item.photo = Some(photo)))
    }

    async fn delete(&self, id: ItemId) -> AppResult<Option<InventoryItem>> {
        let mut inner = self.inner.write();
        let index = inner.items.iter().position(|item| item.id == id);
        Ok(index.map(|index| inner.items.remove(index)))
    }
}

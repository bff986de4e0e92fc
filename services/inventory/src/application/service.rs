//! 库存应用服务

use std::path::PathBuf;
use std::sync::Arc;

use inventory_errors::{AppError, AppResult};
use tracing::info;

use super::views::{ItemView, SearchResult};
use crate::domain::{InventoryItem, InventoryRepository, ItemId, ItemPatch, NewItem};
use crate::infrastructure::{PhotoStore, UploadedPhoto};

const ITEM_NOT_FOUND: &str = "Item not found";
const PHOTO_NOT_SET: &str = "Photo not found for this item";
const PHOTO_FILE_MISSING: &str = "Photo file not found";
const NAME_REQUIRED: &str = "inventory_name is required";
const NO_PHOTO_UPLOADED: &str = "No photo uploaded";

/// 注册命令
#[derive(Debug, Clone, Default)]
pub struct RegisterItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub photo: Option<UploadedPhoto>,
}

/// 搜索条件，`id` 为 `None` 表示请求中的 ID 缺失或无法解析
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchQuery {
    pub id: Option<ItemId>,
    pub include_photo_url: bool,
}

pub struct InventoryService {
    repo: Arc<dyn InventoryRepository>,
    photos: PhotoStore,
}

impl InventoryService {
    pub fn new(repo: Arc<dyn InventoryRepository>, photos: PhotoStore) -> Self {
        Self { repo, photos }
    }

    /// 注册新条目，名称去除空白后不能为空
    pub async fn register(&self, cmd: RegisterItem) -> AppResult<InventoryItem> {
        let name = cmd
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::validation(NAME_REQUIRED))?;

        let photo = match cmd.photo.filter(|photo| !photo.is_blank()) {
            Some(photo) => Some(self.photos.save(&photo).await?),
            None => None,
        };

        let item = self
            .repo
            .insert(NewItem {
                name,
                description: cmd.description.unwrap_or_default(),
                photo,
            })
            .await?;

        info!(item_id = %item.id, photo = ?item.photo, "Inventory item registered");
        Ok(item)
    }

    pub async fn list(&self) -> AppResult<Vec<ItemView>> {
        let items = self.repo.find_all().await?;
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            views.push(self.view(item).await);
        }
        Ok(views)
    }

    pub async fn get(&self, id: ItemId) -> AppResult<ItemView> {
        let item = self.find(id).await?;
        Ok(self.view(item).await)
    }

    /// 部分更新；名称不做非空校验
    pub async fn update_fields(&self, id: ItemId, patch: ItemPatch) -> AppResult<InventoryItem> {
        let item = self
            .repo
            .update_fields(id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))?;

        info!(item_id = %id, "Inventory item updated");
        Ok(item)
    }

    /// 替换照片；旧文件保留在缓存目录中
    pub async fn update_photo(&self, id: ItemId, photo: Option<UploadedPhoto>) -> AppResult<InventoryItem> {
        self.find(id).await?;

        let photo = photo
            .filter(|photo| !photo.is_blank())
            .ok_or_else(|| AppError::validation(NO_PHOTO_UPLOADED))?;
        let name = self.photos.save(&photo).await?;

        let item = self
            .repo
            .set_photo(id, name)
            .await?
            .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))?;

        info!(item_id = %id, photo = ?item.photo, "Inventory photo updated");
        Ok(item)
    }

    /// 解析照片文件路径：条目不存在、未设置照片、文件已丢失均为 NotFound
    pub async fn photo_path(&self, id: ItemId) -> AppResult<PathBuf> {
        let item = self.find(id).await?;
        let photo = item
            .photo
            .ok_or_else(|| AppError::not_found(PHOTO_NOT_SET))?;

        self.photos
            .locate(&photo)
            .await
            .ok_or_else(|| AppError::not_found(PHOTO_FILE_MISSING))
    }

    /// 删除条目并返回；照片文件保留
    pub async fn delete(&self, id: ItemId) -> AppResult<InventoryItem> {
        let item = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))?;

        info!(item_id = %id, "Inventory item deleted");
        Ok(item)
    }

    pub async fn search(&self, query: SearchQuery) -> AppResult<SearchResult> {
        let id = query.id.ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))?;
        let item = self.find(id).await?;

        let photo_url = if query.include_photo_url {
            Some(self.view(item.clone()).await.photo_url)
        } else {
            None
        };

        Ok(SearchResult {
            id: item.id,
            name: item.name,
            description: item.description,
            photo_url,
        })
    }

    async fn find(&self, id: ItemId) -> AppResult<InventoryItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))
    }

    async fn view(&self, item: InventoryItem) -> ItemView {
        let available = match &item.photo {
            Some(photo) => self.photos.exists(photo).await,
            None => false,
        };
        ItemView::new(item, available)
    }
}

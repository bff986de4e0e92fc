//! 返回给客户端的条目投影

use serde::Serialize;

use crate::domain::{InventoryItem, ItemId};

/// 列表 / 详情视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
    pub photo_url: Option<String>,
}

impl ItemView {
    /// `photo_available` 为照片文件此刻是否存在
    pub fn new(item: InventoryItem, photo_available: bool) -> Self {
        let photo_url = (photo_available && item.photo.is_some()).then(|| item.photo_route());
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            photo: item.photo,
            photo_url,
        }
    }
}

/// 搜索结果，`photo_url` 仅在请求时出现（可能为 null）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Option<String>>,
}

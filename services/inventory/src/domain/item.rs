//! 库存条目

use std::str::FromStr;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 条目 ID，从 1 开始递增，删除后不复用
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// 库存条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// 缓存目录中的照片文件名
    pub photo: Option<String>,
}

impl InventoryItem {
    /// 照片访问路径，与是否存在照片无关
    pub fn photo_route(&self) -> String {
        format!("/inventory/{}/photo", self.id)
    }

    /// 应用部分更新，未提供的字段保持不变
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

/// 待插入的条目（尚未分配 ID）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub photo: Option<String>,
}

/// 部分更新：`None` 表示字段未提供，`Some("")` 表示显式置空
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

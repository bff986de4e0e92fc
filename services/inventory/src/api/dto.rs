//! 请求 / 响应 DTO

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::SearchQuery;
use crate::domain::{InventoryItem, ItemId};

pub const MSG_REGISTERED: &str = "Item registered successfully";
pub const MSG_UPDATED: &str = "Item updated successfully";
pub const MSG_PHOTO_UPDATED: &str = "Photo updated successfully";
pub const MSG_DELETED: &str = "Item deleted successfully";

/// 注册表单字段
pub const FIELD_NAME: &str = "inventory_name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PHOTO: &str = "photo";

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub message: String,
    pub item: InventoryItem,
}

impl ItemResponse {
    pub fn new(message: &str, item: InventoryItem) -> Self {
        Self {
            message: message.to_string(),
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: InventoryItem,
}

/// 不带文件的注册请求（JSON / url-encoded）；`null` 视为缺失，未知字段忽略
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, rename = "inventory_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 搜索请求，JSON 与表单两种提交方式都要兼容
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ItemId>,
    #[serde(default, deserialize_with = "truthy")]
    pub has_photo: bool,
}

impl From<SearchRequest> for SearchQuery {
    fn from(req: SearchRequest) -> Self {
        Self {
            id: req.id,
            include_photo_url: req.has_photo,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// 数字或数字字符串；无法解析时视为缺失
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            Some(ItemId(n as u64))
        }
        Some(Loose::Text(s)) => s.parse().ok(),
        _ => None,
    };
    Ok(id)
}

/// 复选框提交 `"on"`；`""`、`"false"`、`"0"`、`"off"` 视为 false
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Loose>::deserialize(deserializer)? {
        None => false,
        Some(Loose::Bool(b)) => b,
        Some(Loose::Number(n)) => n != 0.0,
        Some(Loose::Text(s)) => {
            let s = s.trim().to_ascii_lowercase();
            !matches!(s.as_str(), "" | "false" | "0" | "off")
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SearchRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_search_request_json() {
        let req = parse(json!({"id": 3, "has_photo": true}));
        assert_eq!(req.id, Some(ItemId(3)));
        assert!(req.has_photo);

        let req = parse(json!({"id": "12", "has_photo": false}));
        assert_eq!(req.id, Some(ItemId(12)));
        assert!(!req.has_photo);
    }

    #[test]
    fn test_search_request_missing_fields() {
        let req = parse(json!({}));
        assert!(req.id.is_none());
        assert!(!req.has_photo);

        let req = parse(json!({"id": null, "has_photo": null}));
        assert!(req.id.is_none());
        assert!(!req.has_photo);
    }

    #[test]
    fn test_search_request_unparsable_id() {
        assert!(parse(json!({"id": "abc"})).id.is_none());
        assert!(parse(json!({"id": -1})).id.is_none());
        assert!(parse(json!({"id": 1.5})).id.is_none());
    }

    #[test]
    fn test_register_request_tolerates_nulls_and_extras() {
        let req: RegisterRequest =
            serde_json::from_value(json!({"inventory_name": "X", "description": null, "qty": 3}))
                .unwrap();
        assert_eq!(req.name.as_deref(), Some("X"));
        assert!(req.description.is_none());
    }

    #[test]
    fn test_has_photo_strings() {
        for (raw, expected) in [("on", true), ("true", true), ("off", false), ("", false), ("0", false)] {
            assert_eq!(parse(json!({"has_photo": raw})).has_photo, expected, "{raw}");
        }
        assert!(parse(json!({"has_photo": 1})).has_photo);
    }
}

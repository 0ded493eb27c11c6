//! 数据传输对象 (DTO)
//!
//! 仓库层的输入输出结构定义。

use crate::entity::{games, listings, stores};
use serde::{Deserialize, Deserializer, Serialize};

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

// ==================== 游戏 ====================

/// 用于插入游戏的数据结构
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsertGameData {
    pub title: String,
    pub rating: Option<String>,
    pub console: Option<String>,
    pub genre: Option<String>,
    pub image: Option<String>,
}

/// 用于更新游戏的数据结构
///
/// 所有字段均为 Option，允许部分更新。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGameData {
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub console: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

// ==================== 门店 ====================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsertStoreData {
    pub name: String,
    pub location: String,
    pub hours: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateStoreData {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours: Option<Option<String>>,
}

// ==================== 上架记录 ====================

/// 用于插入上架记录的数据结构
///
/// created_at 为空时使用当前 UTC 时间
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InsertListingData {
    pub price: Option<f64>,
    pub stock: i32,
    pub condition: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub game_id: Option<i32>,
    pub store_id: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateListingData {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Option<f64>>,
    pub stock: Option<i32>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub game_id: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<Option<i32>>,
}

/// 上架记录及其关联的游戏和门店
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingDetail {
    pub listing: listings::Model,
    pub game: Option<games::Model>,
    pub store: Option<stores::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_absent_from_null() {
        let update: UpdateGameData =
            serde_json::from_str(r#"{"rating": null, "genre": "RPG"}"#).unwrap();
        assert_eq!(update.rating, Some(None));
        assert_eq!(update.genre, Some(Some("RPG".to_string())));
        assert_eq!(update.console, None);
        assert_eq!(update.title, None);
    }

    #[test]
    fn update_keeps_absent_fields_absent_after_serialize() {
        let update = UpdateListingData {
            price: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["price"], serde_json::Value::Null);
        assert!(json.get("condition").is_none());
        assert!(json.get("game_id").is_none());

        let parsed: UpdateListingData = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.price, Some(None));
        assert_eq!(parsed.condition, None);
        assert_eq!(parsed.game_id, None);
        assert_eq!(parsed.store_id, None);
    }

    #[test]
    fn listing_update_can_clear_foreign_keys() {
        let update: UpdateListingData =
            serde_json::from_str(r#"{"game_id": null, "stock": 4}"#).unwrap();
        assert_eq!(update.game_id, Some(None));
        assert_eq!(update.store_id, None);
        assert_eq!(update.stock, Some(4));
    }
}

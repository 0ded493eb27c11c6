//! 门店数据仓库

use crate::database::dto::{InsertStoreData, UpdateStoreData};
use crate::entity::prelude::*;
use crate::entity::stores;
use sea_orm::*;

/// 门店数据仓库
pub struct StoresRepository;

impl StoresRepository {
    /// 插入门店，返回新记录 ID
    pub async fn insert(db: &DatabaseConnection, store: InsertStoreData) -> Result<i32, DbErr> {
        let store_active = stores::ActiveModel {
            id: NotSet,
            name: Set(store.name),
            location: Set(store.location),
            hours: Set(store.hours),
        };

        let result = store_active.insert(db).await?;
        Ok(result.id)
    }

    /// 部分更新门店信息
    pub async fn update(
        db: &DatabaseConnection,
        store_id: i32,
        updates: UpdateStoreData,
    ) -> Result<stores::Model, DbErr> {
        let store_active = stores::ActiveModel {
            id: Set(store_id),
            name: updates.name.map_or(NotSet, Set),
            location: updates.location.map_or(NotSet, Set),
            hours: updates.hours.map_or(NotSet, Set),
        };

        store_active.update(db).await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<stores::Model>, DbErr> {
        Stores::find_by_id(id).one(db).await
    }

    pub async fn find_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Option<stores::Model>, DbErr> {
        Stores::find()
            .filter(stores::Column::Name.eq(name))
            .one(db)
            .await
    }

    /// 获取所有门店，按名称升序
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<stores::Model>, DbErr> {
        Stores::find()
            .order_by_asc(stores::Column::Name)
            .all(db)
            .await
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Stores::delete_by_id(id).exec(db).await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Stores::find().count(db).await
    }
}

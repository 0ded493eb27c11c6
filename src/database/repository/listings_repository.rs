//! 上架记录数据仓库
//!
//! listings 通过外键引用 games 与 stores，
//! 引用不存在的记录时由数据库拒绝写入。

use crate::database::dto::{InsertListingData, ListingDetail, UpdateListingData};
use crate::entity::listings;
use crate::entity::prelude::*;
use sea_orm::sea_query::{NullOrdering, Order};
use sea_orm::*;

/// 上架记录数据仓库
pub struct ListingsRepository;

impl ListingsRepository {
    // ==================== 写入操作 ====================

    /// 插入上架记录，返回新记录 ID
    pub async fn insert(
        db: &DatabaseConnection,
        listing: InsertListingData,
    ) -> Result<i32, DbErr> {
        let created_at = listing
            .created_at
            .unwrap_or_else(|| chrono::Utc::now().naive_utc());

        let listing_active = listings::ActiveModel {
            id: NotSet,
            price: Set(listing.price),
            stock: Set(listing.stock),
            condition: Set(listing.condition),
            created_at: Set(created_at),
            game_id: Set(listing.game_id),
            store_id: Set(listing.store_id),
        };

        let result = listing_active.insert(db).await?;
        Ok(result.id)
    }

    /// 部分更新上架记录（created_at 不可修改）
    pub async fn update(
        db: &DatabaseConnection,
        listing_id: i32,
        updates: UpdateListingData,
    ) -> Result<listings::Model, DbErr> {
        let listing_active = listings::ActiveModel {
            id: Set(listing_id),
            price: updates.price.map_or(NotSet, Set),
            stock: updates.stock.map_or(NotSet, Set),
            condition: updates.condition.map_or(NotSet, Set),
            created_at: NotSet,
            game_id: updates.game_id.map_or(NotSet, Set),
            store_id: updates.store_id.map_or(NotSet, Set),
        };

        listing_active.update(db).await
    }

    /// 增减库存
    ///
    /// 在事务中读取并写回，结果小于 0 时拒绝修改
    pub async fn adjust_stock(
        db: &DatabaseConnection,
        listing_id: i32,
        delta: i32,
    ) -> Result<listings::Model, DbErr> {
        let txn = db.begin().await?;

        let listing = Listings::find_by_id(listing_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("listing {}", listing_id)))?;

        let current = listing.stock;
        let stock = current
            .checked_add(delta)
            .filter(|s| *s >= 0)
            .ok_or_else(|| {
                DbErr::Custom(format!(
                    "库存不足: listing {} 当前库存 {}，变更 {}",
                    listing_id, current, delta
                ))
            })?;

        let mut listing_active: listings::ActiveModel = listing.into();
        listing_active.stock = Set(stock);
        let updated = listing_active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Listings::delete_by_id(id).exec(db).await
    }

    // ==================== 查询操作 ====================

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<listings::Model>, DbErr> {
        Listings::find_by_id(id).one(db).await
    }

    /// 查询上架记录及其关联的游戏、门店
    pub async fn find_detail_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<ListingDetail>, DbErr> {
        let Some(listing) = Listings::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let game = match listing.game_id {
            Some(game_id) => Games::find_by_id(game_id).one(db).await?,
            None => None,
        };
        let store = match listing.store_id {
            Some(store_id) => Stores::find_by_id(store_id).one(db).await?,
            None => None,
        };

        Ok(Some(ListingDetail {
            listing,
            game,
            store,
        }))
    }

    /// 某款游戏的所有上架记录，按价格升序（无价格的排在最后）
    pub async fn find_by_game(
        db: &DatabaseConnection,
        game_id: i32,
    ) -> Result<Vec<listings::Model>, DbErr> {
        Listings::find()
            .filter(listings::Column::GameId.eq(game_id))
            .order_by_with_nulls(listings::Column::Price, Order::Asc, NullOrdering::Last)
            .order_by_asc(listings::Column::Id)
            .all(db)
            .await
    }

    /// 某家门店的所有上架记录，最新的在前
    pub async fn find_by_store(
        db: &DatabaseConnection,
        store_id: i32,
    ) -> Result<Vec<listings::Model>, DbErr> {
        Listings::find()
            .filter(listings::Column::StoreId.eq(store_id))
            .order_by_desc(listings::Column::CreatedAt)
            .order_by_desc(listings::Column::Id)
            .all(db)
            .await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Listings::find().count(db).await
    }
}

//! 游戏数据仓库

use crate::database::dto::{InsertGameData, UpdateGameData};
use crate::entity::games;
use crate::entity::prelude::*;
use sea_orm::*;

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏数据，返回新记录 ID
    ///
    /// title 重复时数据库返回唯一约束错误
    pub async fn insert(db: &DatabaseConnection, game: InsertGameData) -> Result<i32, DbErr> {
        let game_active = games::ActiveModel {
            id: NotSet,
            title: Set(game.title),
            rating: Set(game.rating),
            console: Set(game.console),
            genre: Set(game.genre),
            image: Set(game.image),
        };

        let result = game_active.insert(db).await?;
        Ok(result.id)
    }

    /// 更新游戏数据
    ///
    /// 支持部分更新，未提供的字段保持不变
    pub async fn update(
        db: &DatabaseConnection,
        game_id: i32,
        updates: UpdateGameData,
    ) -> Result<games::Model, DbErr> {
        let game_active = games::ActiveModel {
            id: Set(game_id),
            title: updates.title.map_or(NotSet, Set),
            rating: updates.rating.map_or(NotSet, Set),
            console: updates.console.map_or(NotSet, Set),
            genre: updates.genre.map_or(NotSet, Set),
            image: updates.image.map_or(NotSet, Set),
        };

        game_active.update(db).await
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 查询游戏
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 根据标题查询游戏
    pub async fn find_by_title(
        db: &DatabaseConnection,
        title: &str,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find()
            .filter(games::Column::Title.eq(title))
            .one(db)
            .await
    }

    /// 获取所有游戏，按标题升序
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<games::Model>, DbErr> {
        Games::find()
            .order_by_asc(games::Column::Title)
            .all(db)
            .await
    }

    /// 删除游戏
    ///
    /// 仍被 listings 引用时数据库返回外键约束错误
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }

    /// 获取游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::tests::memory_db;
    use migration::SchemaError;

    fn game(title: &str) -> InsertGameData {
        InsertGameData {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let db = memory_db().await;
        let id = GamesRepository::insert(
            &db,
            InsertGameData {
                title: "Chrono Trigger".into(),
                rating: Some("E".into()),
                console: Some("SNES".into()),
                genre: Some("RPG".into()),
                image: None,
            },
        )
        .await
        .unwrap();

        let found = GamesRepository::find_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(found.title, "Chrono Trigger");
        assert_eq!(found.console.as_deref(), Some("SNES"));
        assert_eq!(found.image, None);

        let by_title = GamesRepository::find_by_title(&db, "Chrono Trigger")
            .await
            .unwrap();
        assert_eq!(by_title, Some(found));
    }

    #[tokio::test]
    async fn duplicate_title_is_constraint_violation() {
        let db = memory_db().await;
        GamesRepository::insert(&db, game("Chrono Trigger"))
            .await
            .unwrap();

        let err = GamesRepository::insert(&db, game("Chrono Trigger"))
            .await
            .unwrap_err();
        assert!(SchemaError::from(err).is_constraint_violation());
        assert_eq!(GamesRepository::count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let db = memory_db().await;
        let id = GamesRepository::insert(
            &db,
            InsertGameData {
                title: "EarthBound".into(),
                genre: Some("RPG".into()),
                rating: Some("T".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = GamesRepository::update(
            &db,
            id,
            UpdateGameData {
                rating: Some(None),
                console: Some(Some("SNES".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "EarthBound");
        assert_eq!(updated.genre.as_deref(), Some("RPG"));
        assert_eq!(updated.rating, None);
        assert_eq!(updated.console.as_deref(), Some("SNES"));
    }

    #[tokio::test]
    async fn find_all_sorted_by_title() {
        let db = memory_db().await;
        for title in ["Zelda", "Metroid", "Castlevania"] {
            GamesRepository::insert(&db, game(title)).await.unwrap();
        }

        let titles: Vec<_> = GamesRepository::find_all(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, ["Castlevania", "Metroid", "Zelda"]);

        let removed = GamesRepository::delete(&db, 1).await.unwrap();
        assert_eq!(removed.rows_affected, 1);
        assert_eq!(GamesRepository::count(&db).await.unwrap(), 2);
    }
}

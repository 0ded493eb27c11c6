//! 初始迁移：创建 games、stores、listings
//!
//! 表结构见 [`crate::schema`]，这里只负责接入迁移框架。

use sea_orm_migration::prelude::*;

use crate::migrator::{apply_downgrade, apply_upgrade};

/// 来源结构版本号
pub const REVISION: &str = "6217e8b75d5d";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        apply_upgrade(manager.get_connection()).await?;
        println!("[MIGRATION] revision {} applied", REVISION);
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        apply_downgrade(manager.get_connection()).await?;
        println!("[MIGRATION] revision {} reverted", REVISION);
        Ok(())
    }
}

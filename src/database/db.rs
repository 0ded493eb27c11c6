use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use std::path::{Path, PathBuf};

// ==================== 数据库备份 ====================

/// 生成带时间戳的备份文件名
fn generate_backup_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    format!("game_market_{}.db", timestamp)
}

/// 使用 VACUUM INTO 进行数据库热备份
///
/// 可以在连接保持打开时安全地创建备份，适合在降级等破坏性操作之前调用。
///
/// # Arguments
///
/// * `db` - 当前数据库连接
/// * `backup_dir` - 备份目录，不存在时自动创建
///
/// # Returns
///
/// 备份文件的路径
pub async fn backup_database(
    db: &DatabaseConnection,
    backup_dir: &Path,
) -> Result<PathBuf, DbErr> {
    tokio::fs::create_dir_all(backup_dir)
        .await
        .map_err(|e| DbErr::Custom(format!("无法创建备份目录: {}", e)))?;

    let target_path = backup_dir.join(generate_backup_filename());
    if target_path.exists() {
        return Err(DbErr::Custom(format!(
            "备份文件已存在: {}",
            target_path.display()
        )));
    }

    // SQLite 在 Windows 上也支持正斜杠，使用正斜杠可以避免转义问题
    let target_path_str = target_path
        .to_str()
        .ok_or_else(|| DbErr::Custom("备份路径包含无效字符".to_string()))?
        .replace('\\', "/");

    // 只需要转义单引号
    let escaped_path = target_path_str.replace('\'', "''");
    db.execute_unprepared(&format!("VACUUM INTO '{}'", escaped_path))
        .await?;

    log::info!("数据库热备份成功: {}", target_path_str);
    Ok(target_path)
}

/// 备份到默认目录（数据库文件同级的 backups 子目录）
pub async fn backup_to_default_dir(db: &DatabaseConnection) -> Result<PathBuf, DbErr> {
    let backup_dir = market_path::get_db_backup_dir().map_err(DbErr::Custom)?;
    backup_database(db, &backup_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{close_connection, connect_url, tests::memory_db};
    use crate::database::dto::InsertGameData;
    use crate::database::GamesRepository;

    #[tokio::test]
    async fn vacuum_into_copies_rows() {
        let db = memory_db().await;
        GamesRepository::insert(
            &db,
            InsertGameData {
                title: "Chrono Trigger".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let backup = backup_database(&db, &dir.path().join("backups"))
            .await
            .unwrap();
        assert!(backup.exists());

        let url = migration::backup::path_to_sqlite_url(&backup).unwrap();
        let restored = connect_url(&url).await.unwrap();
        assert_eq!(GamesRepository::count(&restored).await.unwrap(), 1);
        close_connection(restored).await.unwrap();
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use market_path::backup_dir_for;
use sea_orm_migration::sea_orm::DbErr;

/// 备份 SQLite 数据库文件。
///
/// 备份到数据库所在目录的 `backups/` 子目录，
/// 文件名为 `game_market_<label>_<时间戳>.db`。
pub fn backup_sqlite(db_path: &Path, label: &str) -> Result<PathBuf, DbErr> {
    if !db_path.exists() {
        return Err(DbErr::Custom(format!(
            "Database file not found: {}",
            db_path.display()
        )));
    }

    let target_dir = backup_dir_for(db_path);
    fs::create_dir_all(&target_dir)
        .map_err(|e| DbErr::Custom(format!("Failed to create backup dir: {}", e)))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = target_dir.join(format!("game_market_{}_{}.db", label, timestamp));

    fs::copy(db_path, &backup_path)
        .map_err(|e| DbErr::Custom(format!("Failed to copy database: {}", e)))?;

    Ok(backup_path)
}

/// 将文件路径转换为 sqlite 连接 URL
pub fn path_to_sqlite_url(path: &Path) -> Result<String, DbErr> {
    let db_url = url::Url::from_file_path(path)
        .map_err(|_| DbErr::Custom("Invalid database path".to_string()))?;
    Ok(format!("sqlite:{}?mode=rwc", db_url.path()))
}

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 数据库相关路径常量
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "game_market.db";
pub const DB_BACKUP_SUBDIR: &str = "backups";

/// 覆盖数据库文件路径的环境变量
pub const DB_PATH_ENV: &str = "GAME_MARKET_DB_PATH";

/// 获取基础数据目录
pub fn get_base_data_dir() -> Result<PathBuf, String> {
    get_system_data_dir()
}

/// 获取系统数据目录（跨平台）
fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs = BaseDirs::new().ok_or_else(|| "无法获取系统目录信息".to_string())?;

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    {
        Ok(base_dirs.data_dir().join("com.gamemarket.dev"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(base_dirs.data_dir().join("game-market"))
    }
}

/// 获取数据库文件路径
///
/// 优先使用 `GAME_MARKET_DB_PATH` 环境变量，否则使用系统数据目录。
pub fn get_db_path() -> Result<PathBuf, String> {
    resolve_db_path(std::env::var_os(DB_PATH_ENV))
}

/// 根据可选的覆盖值解析数据库文件路径
///
/// 空字符串视为未设置。
pub fn resolve_db_path(override_path: Option<OsString>) -> Result<PathBuf, String> {
    match override_path {
        Some(p) if !p.is_empty() => Ok(PathBuf::from(p)),
        _ => Ok(get_base_data_dir()?.join(DB_DATA_DIR).join(DB_FILE_NAME)),
    }
}

/// 获取数据库备份目录（与数据库文件同级的 backups 子目录）
pub fn get_db_backup_dir() -> Result<PathBuf, String> {
    Ok(backup_dir_for(&get_db_path()?))
}

/// 计算指定数据库文件对应的备份目录
pub fn backup_dir_for(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|p| p.join(DB_BACKUP_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(DB_BACKUP_SUBDIR))
}

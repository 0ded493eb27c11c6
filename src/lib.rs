pub mod database;
pub mod entity;
pub mod utils;

pub use migration::SchemaError;

use sea_orm::{DatabaseConnection, DbErr};
use utils::logs::{init_logging, level_from_env};

/// 初始化日志并打开已迁移到最新结构的数据库
///
/// 日志已被安装时（例如宿主程序自带 logger）保留原有 logger。
pub async fn setup() -> Result<DatabaseConnection, DbErr> {
    if init_logging(level_from_env()).is_err() {
        log::warn!("日志已初始化，跳过");
    }

    match database::init_database().await {
        Ok(conn) => Ok(conn),
        Err(e) => {
            log::error!("数据库初始化失败: {}", e);
            Err(e)
        }
    }
}

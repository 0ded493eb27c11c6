use migration::backup::path_to_sqlite_url;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::time::Duration;

/// 覆盖完整连接字符串的环境变量（与 sea-orm-migration CLI 一致）
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// 解析数据库连接字符串
///
/// 优先级：`DATABASE_URL` > `GAME_MARKET_DB_PATH` > 系统数据目录。
/// 使用本地文件时会确保其所在目录存在。
pub fn resolve_database_url() -> Result<String, DbErr> {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    let db_path = market_path::get_db_path().map_err(|e| DbErr::Conn(RuntimeErr::Internal(e)))?;
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e)))
        })?;
    }
    if db_path.exists() {
        log::info!("使用数据库: {}", db_path.display());
    } else {
        log::info!("首次启动，创建数据库: {}", db_path.display());
    }

    path_to_sqlite_url(&db_path)
}

/// Establish a SeaORM database connection.
pub async fn establish_connection() -> Result<DatabaseConnection, DbErr> {
    let url = resolve_database_url()?;
    connect_url(&url).await
}

/// 按连接字符串建立连接
pub async fn connect_url(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(1) // 对于本地 SQLite，连接池大小为 1 即可
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    log::debug!("Database connection string: {}", options.get_url());

    Database::connect(options).await
}

/// 建立连接并执行全部待执行的迁移
pub async fn init_database() -> Result<DatabaseConnection, DbErr> {
    let conn = establish_connection().await?;
    log::info!("数据库连接建立成功");

    log::info!("开始执行数据库迁移...");
    if let Err(e) = migration::Migrator::up(&conn, None).await {
        log::error!("数据库迁移失败: {}", e);
        return Err(e);
    }
    log::info!("数据库迁移完成");

    Ok(conn)
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 已执行迁移的内存数据库
    pub(crate) async fn memory_db() -> DatabaseConnection {
        let conn = connect_url("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&conn, None).await.unwrap();
        conn
    }

    #[tokio::test]
    async fn memory_db_has_market_tables() {
        let conn = memory_db().await;
        assert_eq!(
            migration::application_tables(&conn).await.unwrap(),
            ["games", "stores", "listings"]
        );
        close_connection(conn).await.unwrap();
    }

    #[tokio::test]
    async fn file_database_is_created_on_connect() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("game_market.db");
        fs::create_dir_all(db_path.parent().unwrap()).unwrap();

        let url = path_to_sqlite_url(&db_path).unwrap();
        let conn = connect_url(&url).await.unwrap();
        migration::Migrator::up(&conn, None).await.unwrap();
        close_connection(conn).await.unwrap();

        assert!(db_path.exists());
    }
}

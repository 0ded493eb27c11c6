use migration::backup::{backup_sqlite, path_to_sqlite_url};
use sea_orm_migration::prelude::*;

/// 会删除数据的子命令，执行前先备份数据库文件
const DESTRUCTIVE_COMMANDS: &[&str] = &["down", "fresh", "refresh", "reset"];

#[async_std::main]
async fn main() {
    // 未显式提供 DATABASE_URL 时，从默认数据目录推导
    if std::env::var_os("DATABASE_URL").is_none() {
        let db_path = match market_path::get_db_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("[MIGRATION] Failed to resolve database path: {}", e);
                std::process::exit(1);
            }
        };

        if let Some(parent) = db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("[MIGRATION] Failed to create database dir: {}", e);
                std::process::exit(1);
            }
        }

        let is_destructive = std::env::args()
            .skip(1)
            .any(|arg| DESTRUCTIVE_COMMANDS.contains(&arg.as_str()));
        if is_destructive && db_path.exists() {
            match backup_sqlite(&db_path, migration::REVISION) {
                Ok(path) => println!("[MIGRATION] Database backed up to: {}", path.display()),
                Err(e) => {
                    eprintln!("[MIGRATION] Backup failed, aborting: {}", e);
                    std::process::exit(1);
                }
            }
        }

        match path_to_sqlite_url(&db_path) {
            Ok(url) => std::env::set_var("DATABASE_URL", url),
            Err(e) => {
                eprintln!("[MIGRATION] {}", e);
                std::process::exit(1);
            }
        }
    }

    cli::run_cli(migration::Migrator).await;
}

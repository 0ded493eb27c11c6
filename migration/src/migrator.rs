//! 市场表结构的升级与降级
//!
//! 所有步骤都由 [`crate::schema::MARKET_SCHEMA`] 推导：
//! 升级按创建顺序建表，降级按逆序删表，删表前检查外键依赖。

use log::info;
use sea_orm_migration::sea_orm::{
    ConnectionTrait, DatabaseBackend, Statement, TransactionTrait,
};

use crate::schema_error::SchemaError;
use crate::schema::{creation_order, drop_order, find_table, TableDecl, MARKET_SCHEMA};

/// 创建 games、stores、listings 三张表
///
/// 在单个事务中执行，任一步失败则整体回滚。
/// 任意一张表已存在时返回 [`SchemaError::DuplicateTable`]。
pub async fn upgrade<C>(db: &C) -> Result<(), SchemaError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    apply_upgrade(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// 按 listings、stores、games 的顺序删除三张表
///
/// 任意一张表不存在时返回 [`SchemaError::MissingTable`]，
/// 有其他表仍引用待删除的表时返回 [`SchemaError::DependencyOrder`]。
pub async fn downgrade<C>(db: &C) -> Result<(), SchemaError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    apply_downgrade(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// 删除单张结构表，先检查是否仍被其他表引用
pub async fn drop_table<C>(db: &C, name: &str) -> Result<(), SchemaError>
where
    C: ConnectionTrait,
{
    let table = find_table(name).ok_or_else(|| SchemaError::MissingTable {
        table: name.to_string(),
    })?;
    if !table_exists(db, table.name).await? {
        return Err(SchemaError::MissingTable {
            table: table.name.to_string(),
        });
    }
    drop_checked(db, table).await
}

/// 当前存在的结构表（按创建顺序）
pub async fn application_tables<C>(db: &C) -> Result<Vec<&'static str>, SchemaError>
where
    C: ConnectionTrait,
{
    let mut present = Vec::new();
    for table in MARKET_SCHEMA {
        if table_exists(db, table.name).await? {
            present.push(table.name);
        }
    }
    Ok(present)
}

pub(crate) async fn apply_upgrade<C>(conn: &C) -> Result<(), SchemaError>
where
    C: ConnectionTrait,
{
    for table in creation_order() {
        if table_exists(conn, table.name).await? {
            return Err(SchemaError::DuplicateTable {
                table: table.name.to_string(),
            });
        }
    }

    let backend = conn.get_database_backend();
    for table in creation_order() {
        conn.execute(backend.build(&table.create_statement())).await?;
        info!("[MIGRATION] Created table {}", table.name);
    }
    Ok(())
}

pub(crate) async fn apply_downgrade<C>(conn: &C) -> Result<(), SchemaError>
where
    C: ConnectionTrait,
{
    for table in drop_order() {
        if !table_exists(conn, table.name).await? {
            return Err(SchemaError::MissingTable {
                table: table.name.to_string(),
            });
        }
    }

    // 迁移框架在 SQLite 上不包事务，依赖必须在第一次删表之前全部检查完
    let order: Vec<&TableDecl> = drop_order().collect();
    for (i, table) in order.iter().enumerate() {
        let dependents: Vec<String> = referencing_tables(conn, table.name)
            .await?
            .into_iter()
            .filter(|dependent| !order[..i].iter().any(|t| t.name == dependent.as_str()))
            .collect();
        if !dependents.is_empty() {
            return Err(SchemaError::DependencyOrder {
                table: table.name.to_string(),
                dependents,
            });
        }
    }

    for table in order {
        drop_checked(conn, table).await?;
    }
    Ok(())
}

async fn drop_checked<C>(conn: &C, table: &TableDecl) -> Result<(), SchemaError>
where
    C: ConnectionTrait,
{
    let dependents = referencing_tables(conn, table.name).await?;
    if !dependents.is_empty() {
        return Err(SchemaError::DependencyOrder {
            table: table.name.to_string(),
            dependents,
        });
    }

    let backend = conn.get_database_backend();
    conn.execute(backend.build(&table.drop_statement())).await?;
    info!("[MIGRATION] Dropped table {}", table.name);
    Ok(())
}

/// 检查表是否存在
async fn table_exists<C>(conn: &C, name: &str) -> Result<bool, SchemaError>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Sqlite => "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?",
        DatabaseBackend::Postgres => {
            "SELECT 1 FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1"
        }
        DatabaseBackend::MySql => {
            "SELECT 1 FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = ?"
        }
    };
    let row = conn
        .query_one(Statement::from_sql_and_values(backend, sql, [name.into()]))
        .await?;
    Ok(row.is_some())
}

/// 除自身外，仍声明外键指向 `name` 的表
async fn referencing_tables<C>(conn: &C, name: &str) -> Result<Vec<String>, SchemaError>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Sqlite => {
            r#"SELECT DISTINCT m.name AS name
               FROM sqlite_master m, pragma_foreign_key_list(m.name) p
               WHERE m.type = 'table' AND p."table" = ? AND m.name <> ?
               ORDER BY m.name"#
        }
        DatabaseBackend::Postgres => {
            r#"SELECT DISTINCT tc.table_name::text AS name
               FROM information_schema.table_constraints tc
               JOIN information_schema.constraint_column_usage ccu
                 ON tc.constraint_name = ccu.constraint_name
                AND tc.table_schema = ccu.table_schema
               WHERE tc.constraint_type = 'FOREIGN KEY'
                 AND tc.table_schema = current_schema()
                 AND ccu.table_name = $1 AND tc.table_name <> $2
               ORDER BY name"#
        }
        DatabaseBackend::MySql => {
            r#"SELECT DISTINCT TABLE_NAME AS name
               FROM information_schema.KEY_COLUMN_USAGE
               WHERE TABLE_SCHEMA = DATABASE()
                 AND REFERENCED_TABLE_NAME = ? AND TABLE_NAME <> ?
               ORDER BY name"#
        }
    };

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            backend,
            sql,
            [name.into(), name.into()],
        ))
        .await?;

    rows.iter()
        .map(|row| row.try_get::<String>("", "name").map_err(SchemaError::from))
        .collect()
}

//! 市场数据库的声明式结构定义
//!
//! 三张表（games、stores、listings）以常量数据描述，
//! 建表与删表语句都从这里机械生成，迁移代码本身不再手写列定义。

use sea_orm_migration::sea_orm::sea_query::{
    Alias, ColumnDef, ForeignKey, Table, TableCreateStatement, TableDropStatement,
};

/// 列的逻辑类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    String,
    Float,
    Timestamp,
}

/// 单列定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDecl {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    /// 自然键，建表时附带 UNIQUE 约束
    pub unique: bool,
}

/// 外键定义（`column` 引用 `references.referenced_column`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDecl {
    pub column: &'static str,
    pub references: &'static str,
    pub referenced_column: &'static str,
}

/// 表定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDecl {
    pub name: &'static str,
    /// 自增整数主键列
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDecl],
    pub foreign_keys: &'static [ForeignKeyDecl],
}

const fn required(name: &'static str, kind: ColumnKind) -> ColumnDecl {
    ColumnDecl {
        name,
        kind,
        nullable: false,
        unique: false,
    }
}

const fn optional(name: &'static str, kind: ColumnKind) -> ColumnDecl {
    ColumnDecl {
        name,
        kind,
        nullable: true,
        unique: false,
    }
}

const fn natural_key(name: &'static str) -> ColumnDecl {
    ColumnDecl {
        name,
        kind: ColumnKind::String,
        nullable: false,
        unique: true,
    }
}

pub const GAMES: TableDecl = TableDecl {
    name: "games",
    primary_key: "id",
    columns: &[
        required("id", ColumnKind::Integer),
        natural_key("title"),
        optional("rating", ColumnKind::String),
        optional("console", ColumnKind::String),
        optional("genre", ColumnKind::String),
        // 封面 URL 或本地路径
        optional("image", ColumnKind::String),
    ],
    foreign_keys: &[],
};

pub const STORES: TableDecl = TableDecl {
    name: "stores",
    primary_key: "id",
    columns: &[
        required("id", ColumnKind::Integer),
        natural_key("name"),
        required("location", ColumnKind::String),
        optional("hours", ColumnKind::String),
    ],
    foreign_keys: &[],
};

pub const LISTINGS: TableDecl = TableDecl {
    name: "listings",
    primary_key: "id",
    columns: &[
        required("id", ColumnKind::Integer),
        optional("price", ColumnKind::Float),
        required("stock", ColumnKind::Integer),
        optional("condition", ColumnKind::String),
        required("created_at", ColumnKind::Timestamp),
        optional("game_id", ColumnKind::Integer),
        optional("store_id", ColumnKind::Integer),
    ],
    foreign_keys: &[
        ForeignKeyDecl {
            column: "game_id",
            references: "games",
            referenced_column: "id",
        },
        ForeignKeyDecl {
            column: "store_id",
            references: "stores",
            referenced_column: "id",
        },
    ],
};

/// 按创建顺序排列：被引用的表在前
pub const MARKET_SCHEMA: &[TableDecl] = &[GAMES, STORES, LISTINGS];

/// 外键约束命名规则：`fk_<table>_<column>_<referenced_table>`
///
/// 外部的结构检查工具依赖此名称，不要修改。
pub fn fk_name(table: &str, column: &str, referenced_table: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referenced_table)
}

/// 创建顺序
pub fn creation_order() -> impl Iterator<Item = &'static TableDecl> {
    MARKET_SCHEMA.iter()
}

/// 删除顺序（创建顺序的逆序，持有外键的表先删）
pub fn drop_order() -> impl Iterator<Item = &'static TableDecl> {
    MARKET_SCHEMA.iter().rev()
}

/// 按表名查找定义
pub fn find_table(name: &str) -> Option<&'static TableDecl> {
    MARKET_SCHEMA.iter().find(|t| t.name == name)
}

impl ColumnDecl {
    fn to_column_def(self, is_primary_key: bool) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(self.name));
        match self.kind {
            ColumnKind::Integer => def.integer(),
            ColumnKind::String => def.string(),
            // 双精度，对应 SQL 的 FLOAT
            ColumnKind::Float => def.double(),
            ColumnKind::Timestamp => def.date_time(),
        };

        if self.nullable {
            def.null();
        } else {
            def.not_null();
        }
        if is_primary_key {
            def.auto_increment().primary_key();
        }
        if self.unique {
            def.unique_key();
        }
        def
    }
}

impl TableDecl {
    pub fn column(&self, name: &str) -> Option<&ColumnDecl> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 本表外键引用的表名
    pub fn references(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.foreign_keys.iter().map(|fk| fk.references)
    }

    /// 生成 CREATE TABLE 语句
    ///
    /// 故意不加 IF NOT EXISTS：表已存在时必须报错。
    pub fn create_statement(&self) -> TableCreateStatement {
        let mut stmt = Table::create();
        stmt.table(Alias::new(self.name));

        for column in self.columns {
            stmt.col(column.to_column_def(column.name == self.primary_key));
        }

        for fk in self.foreign_keys {
            stmt.foreign_key(
                ForeignKey::create()
                    .name(fk_name(self.name, fk.column, fk.references))
                    .from(Alias::new(self.name), Alias::new(fk.column))
                    .to(Alias::new(fk.references), Alias::new(fk.referenced_column)),
            );
        }

        stmt.to_owned()
    }

    /// 生成 DROP TABLE 语句
    pub fn drop_statement(&self) -> TableDropStatement {
        Table::drop().table(Alias::new(self.name)).to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::sea_query::SqliteQueryBuilder;

    #[test]
    fn referenced_tables_are_created_first() {
        for (idx, table) in MARKET_SCHEMA.iter().enumerate() {
            for referenced in table.references() {
                let pos = MARKET_SCHEMA
                    .iter()
                    .position(|t| t.name == referenced)
                    .expect("foreign key points outside the schema");
                assert!(pos < idx, "{} must be created before {}", referenced, table.name);
            }
        }
    }

    #[test]
    fn drop_order_is_reverse_of_creation() {
        let created: Vec<_> = creation_order().map(|t| t.name).collect();
        let dropped: Vec<_> = drop_order().map(|t| t.name).collect();
        assert_eq!(created, ["games", "stores", "listings"]);
        assert_eq!(dropped, ["listings", "stores", "games"]);
    }

    #[test]
    fn nullability_matches_table_layout() {
        let nullable = |t: &TableDecl| -> Vec<&str> {
            t.columns
                .iter()
                .filter(|c| c.nullable)
                .map(|c| c.name)
                .collect()
        };
        assert_eq!(nullable(&GAMES), ["rating", "console", "genre", "image"]);
        assert_eq!(nullable(&STORES), ["hours"]);
        assert_eq!(
            nullable(&LISTINGS),
            ["price", "condition", "game_id", "store_id"]
        );
        assert!(GAMES.column("title").unwrap().unique);
        assert!(STORES.column("name").unwrap().unique);
        assert!(!STORES.column("location").unwrap().nullable);
    }

    #[test]
    fn foreign_key_names_follow_convention() {
        assert_eq!(
            fk_name("listings", "game_id", "games"),
            "fk_listings_game_id_games"
        );

        let sql = LISTINGS.create_statement().to_string(SqliteQueryBuilder);
        assert!(sql.contains(r#"CONSTRAINT "fk_listings_game_id_games""#), "{sql}");
        assert!(sql.contains(r#"CONSTRAINT "fk_listings_store_id_stores""#), "{sql}");
        assert!(!sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn unique_natural_keys_render() {
        let sql = GAMES.create_statement().to_string(SqliteQueryBuilder);
        assert!(sql.starts_with(r#"CREATE TABLE "games""#), "{sql}");
        assert!(sql.contains("UNIQUE"), "{sql}");
        assert!(sql.contains("AUTOINCREMENT"), "{sql}");
    }

    #[test]
    fn find_table_by_name() {
        assert_eq!(find_table("stores"), Some(&STORES));
        assert_eq!(find_table("users"), None);
    }
}

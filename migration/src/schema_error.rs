use sea_orm_migration::sea_orm::{DbErr, SqlErr};

/// 结构迁移错误
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// 升级时表已存在
    #[error("table `{table}` already exists")]
    DuplicateTable { table: String },

    /// 降级时表不存在
    #[error("table `{table}` does not exist")]
    MissingTable { table: String },

    /// 唯一约束或外键约束冲突
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// 仍有其他表通过外键引用将要删除的表
    #[error("cannot drop `{table}` while {} still reference it", .dependents.join(", "))]
    DependencyOrder {
        table: String,
        dependents: Vec<String>,
    },

    #[error(transparent)]
    Database(DbErr),
}

impl SchemaError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, SchemaError::ConstraintViolation(_))
    }
}

impl From<DbErr> for SchemaError {
    /// 将驱动错误归类为结构错误
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return SchemaError::ConstraintViolation(msg);
            }
            _ => {}
        }

        // SQLite 的错误码不一定能被识别，退回到消息匹配
        let message = err.to_string();
        if message.contains("UNIQUE constraint failed")
            || message.contains("FOREIGN KEY constraint failed")
        {
            return SchemaError::ConstraintViolation(message);
        }
        if message.contains("already exists") {
            if let Some(table) = table_after(&message, "table ") {
                return SchemaError::DuplicateTable { table };
            }
        }
        if let Some(table) = table_after(&message, "no such table: ") {
            return SchemaError::MissingTable { table };
        }

        SchemaError::Database(err)
    }
}

impl From<SchemaError> for DbErr {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Database(e) => e,
            other => DbErr::Custom(other.to_string()),
        }
    }
}

/// 取出 `marker` 之后的表名，去掉引号
fn table_after(message: &str, marker: &str) -> Option<String> {
    let start = message.find(marker)? + marker.len();
    let name = message[start..]
        .split_whitespace()
        .next()?
        .trim_matches(|c| c == '"' || c == '`' || c == '\'');
    (!name.is_empty()).then(|| name.to_string())
}

//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义，与 `migration::schema` 中的表一一对应。

pub mod prelude;

pub mod games;
pub mod listings;
pub mod stores;

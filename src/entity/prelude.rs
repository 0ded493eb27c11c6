//! 预导入模块
//!
//! 提供常用类型的快捷导入。

pub use super::games::Entity as Games;
pub use super::listings::Entity as Listings;
pub use super::stores::Entity as Stores;

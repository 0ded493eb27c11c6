pub use sea_orm_migration::prelude::*;

pub mod backup;
mod schema_error;
mod m20241120_173107_initial_migration;
pub mod migrator;
pub mod schema;

pub use schema_error::SchemaError;
pub use m20241120_173107_initial_migration::REVISION;
pub use migrator::{application_tables, downgrade, drop_table, upgrade};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241120_173107_initial_migration::Migration)]
    }
}

pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m020260601_000001_ip_ranges_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m020260601_000001_ip_ranges_table::Migration)]
    }
}

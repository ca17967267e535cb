mod m20261018_120000_first;
mod m20261018_121500_events_unique_slot;

use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_120000_first::Migration),
            Box::new(m20261018_121500_events_unique_slot::Migration),
        ]
    }
}

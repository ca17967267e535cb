use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_events_city_date_start_time";

/// Only one event can take place in a city at a given date and start time.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Events::Table)
                    .col(Events::CityId)
                    .col(Events::Date)
                    .col(Events::StartTime)
                    .unique()
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    CityId,
    Date,
    StartTime,
}

use entity::{
    cities, event_links, events, speakers, talk_links, talk_speakers, talks, venues,
};
use sea_orm::EntityTrait;
use sea_orm_migration::{prelude::*, sea_orm::Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        create_entity_table(manager, &schema, cities::Entity).await?;
        create_entity_table(manager, &schema, venues::Entity).await?;
        create_entity_table(manager, &schema, events::Entity).await?;
        create_entity_table(manager, &schema, event_links::Entity).await?;
        create_entity_table(manager, &schema, talks::Entity).await?;
        create_entity_table(manager, &schema, speakers::Entity).await?;
        create_entity_table(manager, &schema, talk_speakers::Entity).await?;
        create_entity_table(manager, &schema, talk_links::Entity).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_database_backend();
        let schema = Schema::new(db);

        drop_entity_table(manager, &schema, talk_links::Entity).await?;
        drop_entity_table(manager, &schema, talk_speakers::Entity).await?;
        drop_entity_table(manager, &schema, speakers::Entity).await?;
        drop_entity_table(manager, &schema, talks::Entity).await?;
        drop_entity_table(manager, &schema, event_links::Entity).await?;
        drop_entity_table(manager, &schema, events::Entity).await?;
        drop_entity_table(manager, &schema, venues::Entity).await?;
        drop_entity_table(manager, &schema, cities::Entity).await?;

        Ok(())
    }
}

async fn create_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity))
        .await
}

async fn drop_entity_table<'a, E: EntityTrait>(
    manager: &'a SchemaManager<'a>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let Some(table) = schema
        .create_table_from_entity(entity)
        .get_table_name()
        .cloned()
    else {
        return Err(DbErr::Migration(format!(
            "no table name for entity `{}`",
            entity.table_name()
        )));
    };
    manager.drop_table(Table::drop().table(table).take()).await
}

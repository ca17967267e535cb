use entity::cities;
use meetup_lib::{Database, DbEnv, city};
use migration::MigratorTrait as _;
use mkenv::prelude::*;
use sea_orm::{EntityTrait as _, PaginatorTrait as _};

const DB_URL: &str = "sqlite::memory:";

async fn smoke(db: &Database) -> anyhow::Result<()> {
    db.migrate().await?;
    // Running the migrations again changes nothing.
    db.migrate().await?;

    let city = city::create(&db.sql_conn, "Ostrava").await?;
    assert_eq!(city.slug, "ostrava");
    assert_eq!(cities::Entity::find().count(&db.sql_conn).await?, 1);
    Ok(())
}

#[tokio::test]
async fn connect_and_migrate() -> anyhow::Result<()> {
    test_env::init_env()?;

    let db = Database::from_db_url(DB_URL.to_owned()).await?;
    smoke(&db).await?;

    // Rolling back every migration and applying them again leaves an empty schema.
    migration::Migrator::down(&db.sql_conn, None).await?;
    db.migrate().await?;
    assert_eq!(cities::Entity::find().count(&db.sql_conn).await?, 0);

    // SAFETY: this is the only test of this binary, no other thread reads the environment.
    unsafe { std::env::set_var("DATABASE_URL", DB_URL) };
    let env = DbEnv::define();
    assert_eq!(env.max_connections.get(), 10);
    let db = Database::from_env(&env).await?;
    smoke(&db).await?;

    anyhow::Ok(())
}

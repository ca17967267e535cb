use std::panic;

use anyhow::Context as _;
use futures::FutureExt as _;
use meetup_lib::Database;
use migration::MigratorTrait as _;
use mkenv::prelude::*;
use sea_orm::ConnectOptions;
use tracing_subscriber::fmt::TestWriter;

mkenv::make_config! {
    /// The environment of the tests.
    pub struct TestEnv {
        /// The URL of the database the tests run against.
        pub db_url: {
            var_name: "TEST_DATABASE_URL",
            layers: [
                or_default_val(|| "sqlite::memory:".to_owned()),
            ],
            description: "The URL to the database used by the tests",
            default_val_fmt: "sqlite::memory:",
        },
    }
}

pub trait IntoResult {
    type Out;

    fn into_result(self) -> anyhow::Result<Self::Out>;
}

impl IntoResult for () {
    type Out = ();

    fn into_result(self) -> anyhow::Result<Self::Out> {
        Ok(())
    }
}

impl<T, E> IntoResult for Result<T, E>
where
    anyhow::Error: From<E>,
{
    type Out = T;

    fn into_result(self) -> anyhow::Result<Self::Out> {
        self.map_err(From::from)
    }
}

pub fn init_env() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(err) if !err.not_found() => return Err(err).context("cannot retrieve .env files"),
        _ => (),
    }

    let _ = tracing_subscriber::fmt()
        .with_writer(TestWriter::new())
        .try_init();

    Ok(())
}

/// Runs the test against a freshly migrated database.
///
/// With the default in-memory SQLite URL, the pool holds a single connection, so every test
/// gets its own empty database that is dropped with the pool.
pub async fn wrap<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    init_env()?;
    let env = TestEnv::define();

    let mut options = ConnectOptions::new(env.db_url.get());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db.sql_conn, None).await?;

    let r = panic::AssertUnwindSafe(test(db)).catch_unwind().await;

    match r.map(IntoResult::into_result) {
        Ok(out) => out,
        Err(e) => {
            tracing::info!("Test failed");
            panic::resume_unwind(e)
        }
    }
}

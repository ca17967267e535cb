//! Contains the type representing the connection to the database.

use migration::MigratorTrait as _;
use mkenv::prelude::*;
use sea_orm::{ConnectOptions, ConnectionTrait as _, DbConn, DbErr};

use crate::DbEnv;

/// Represents the database of the meetups.
pub struct Database {
    /// The SQL database connection pool.
    pub sql_conn: DbConn,
}

impl Database {
    /// Wraps an existing connection.
    #[inline]
    pub fn from_db_conn(sql_conn: DbConn) -> Self {
        Self { sql_conn }
    }

    /// Connects to the database with the provided options.
    pub async fn connect(options: ConnectOptions) -> Result<Self, DbErr> {
        let sql_conn = sea_orm::Database::connect(options).await?;
        tracing::info!(backend = ?sql_conn.get_database_backend(), "Connected to the database");
        Ok(Self::from_db_conn(sql_conn))
    }

    /// Returns the database from its URL, with the default connection options.
    pub async fn from_db_url(db_url: String) -> Result<Self, DbErr> {
        Self::connect(ConnectOptions::new(db_url)).await
    }

    /// Returns the database configured by the environment.
    pub async fn from_env(env: &DbEnv) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(env.db_url.db_url.get());
        options
            .max_connections(env.max_connections.get())
            .sqlx_logging(env.sql_logging.get());
        Self::connect(options).await
    }

    /// Applies the pending migrations to the database.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        migration::Migrator::up(&self.sql_conn, None).await?;
        tracing::info!("Database schema is up to date");
        Ok(())
    }
}

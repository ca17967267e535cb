#[cfg(debug_assertions)]
mkenv::make_config! {
    /// The environment used to set up a connection to the database.
    pub struct DbUrlEnv {
        /// The database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            description: "The URL to the meetup database",
        }
    }
}
#[cfg(not(debug_assertions))]
mkenv::make_config! {
    /// The environment used to set up a connection to the database.
    pub struct DbUrlEnv {
        /// The path to the file containing the database URL.
        pub db_url: {
            var_name: "DATABASE_URL",
            layers: [
                file_read(),
            ],
            description: "The path to the file containing the URL to the meetup database",
        }
    }
}

mkenv::make_config! {
    /// The environment used to set up the connection pool to the database.
    pub struct DbEnv {
        /// The environment for the database URL.
        pub db_url: { DbUrlEnv },

        /// The maximum amount of connections in the pool.
        pub max_connections: {
            var_name: "DATABASE_MAX_CONNECTIONS",
            layers: [
                parsed_from_str<u32>(),
                or_default_val(|| 10),
            ],
            description: "The maximum amount of connections to the database kept in the pool",
            default_val_fmt: "10",
        },

        /// Whether to log every SQL statement.
        pub sql_logging: {
            var_name: "DATABASE_SQL_LOGGING",
            layers: [
                parsed_from_str<bool>(),
                or_default_val(|| false),
            ],
            description: "Whether to log every SQL statement sent to the database (boolean)",
            default_val_fmt: "false",
        },
    }
}

pub mod connection;

pub use connection::{
    close_connections, create_connection_pool, health_check, test_connection, DbPool,
};

use sqlx::postgres::PgConnectOptions;

// Database configuration structure
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: String::new(),
            database_name: "postgres".to_string(),
            max_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// Build the configuration from a key lookup over the `pg_*` variables.
    ///
    /// `pg_user`, `pg_password` and `pg_database` are required; host, port and
    /// pool size fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> DatabaseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| DatabaseError::Config(format!("{} is not set", key)))
        };

        let port = match lookup("pg_port") {
            Some(raw) => raw.parse().map_err(|_| {
                DatabaseError::Config(format!("pg_port is not a valid port: {}", raw))
            })?,
            None => 5432,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|_| {
                DatabaseError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))
            })?,
            None => 1,
        };

        Ok(Self {
            host: lookup("pg_host").unwrap_or_else(|| "localhost".to_string()),
            port,
            username: required("pg_user")?,
            password: required("pg_password")?,
            database_name: required("pg_database")?,
            max_connections,
        })
    }

    /// Connection options for sqlx, built field by field so passwords never need URL escaping
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database_name)
    }

    /// Connection string with the password masked, for log lines
    pub fn redacted_url(&self) -> String {
        format!(
            "postgresql://{}:***@{}:{}/{}",
            self.username, self.host, self.port, self.database_name
        )
    }
}

// Error types for database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Query error: {0}")]
    Query(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

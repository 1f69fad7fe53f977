use sqlx::{
    postgres::{PgPoolOptions, Postgres},
    Pool,
};
use tracing::{debug, error, info, warn};

use super::{DatabaseConfig, DatabaseError, DatabaseResult};

/// Type alias for the database pool
pub type DbPool = Pool<Postgres>;

/// Create a new connection pool with the given configuration
///
/// The pool is connected eagerly so a wrong host or credentials fail at startup.
pub async fn create_connection_pool(config: &DatabaseConfig) -> DatabaseResult<DbPool> {
    info!("Creating database connection pool...");
    debug!(
        "Database config: host={}, port={}, database={}",
        config.host, config.port, config.database_name
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
        .map_err(|e| {
            error!("Failed to connect to {}: {}", config.redacted_url(), e);
            DatabaseError::Connection(e)
        })?;

    info!(
        "Database connection pool created with {} max connections",
        config.max_connections
    );

    Ok(pool)
}

/// Test database connection
pub async fn test_connection(pool: &DbPool) -> DatabaseResult<()> {
    debug!("Testing database connection...");

    let row: (i32,) = sqlx::query_as("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            error!("Database connection test failed: {}", e);
            DatabaseError::Connection(e)
        })?;

    if row.0 != 1 {
        return Err(DatabaseError::Query(
            "Unexpected result from connection test".to_string(),
        ));
    }

    Ok(())
}

/// Connection health check
pub async fn health_check(pool: &DbPool) -> bool {
    match test_connection(pool).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database health check failed: {}", e);
            false
        }
    }
}

/// Close database connections gracefully
pub async fn close_connections(pool: &DbPool) {
    info!("Closing database connections...");
    pool.close().await;
    info!("Database connections closed");
}

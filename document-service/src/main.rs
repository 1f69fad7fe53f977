use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use document_service::config::Config;
use document_service::db::PgDocumentRepository;
use document_service::routes::router;
use document_service::storage::CloudinaryClient;
use document_service::AppState;
use shared::database;
use shared::observability::{init_logging, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_logging(LogConfig::from_env("document-service")?)?;

    info!("Starting Document Service...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let db_pool = database::create_connection_pool(&config.database).await?;
    database::test_connection(&db_pool).await?;
    info!("Database connection established: {}", config.database.redacted_url());

    let storage = CloudinaryClient::new(config.cloudinary.clone())?;
    info!("Cloudinary client initialized");

    let state = AppState::new(
        Arc::new(storage),
        Arc::new(PgDocumentRepository::new(db_pool.clone())),
        config.upload.clone(),
    );

    let app = router(state);

    let addr = config.bind_address();
    info!("Document Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database::close_connections(&db_pool).await;
    info!("Document Service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

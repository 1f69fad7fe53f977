use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub const GREETING: &str = "Document upload service is running";

pub async fn greeting() -> &'static str {
    GREETING
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_up = state.documents.is_healthy().await;

    let (status, label) = if database_up {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status,
        Json(json!({
            "status": label,
            "service": "document-service",
            "version": env!("CARGO_PKG_VERSION"),
            "database": if database_up { "up" } else { "down" },
        })),
    )
}

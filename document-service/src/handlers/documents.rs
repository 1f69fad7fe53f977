use axum::{extract::State, Json};

use crate::error::{ApiError, ApiResult};
use crate::models::Document;
use crate::AppState;

/// Handle `GET /documents`: every record, newest first
pub async fn list_documents(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let documents = state
        .documents
        .list_documents()
        .await
        .map_err(ApiError::ListDocuments)?;

    tracing::debug!("Listing {} documents", documents.len());
    Ok(Json(documents))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

pub const MISSING_FILE_MESSAGE: &str = "Geen bestand geüpload.";
pub const INVALID_MULTIPART_MESSAGE: &str = "Ongeldige multipart-aanvraag.";
pub const STORAGE_FAILED_MESSAGE: &str = "Upload naar Cloudinary mislukt.";
pub const SAVE_FAILED_MESSAGE: &str = "Opslaan van document mislukt.";
pub const LIST_FAILED_MESSAGE: &str = "Kon documenten niet ophalen.";
pub const INTERNAL_MESSAGE: &str = "Interne serverfout";

/// Everything a request can fail with; each variant ends as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file attached")]
    MissingFile,

    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Storage upload failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to save document: {0}")]
    SaveDocument(#[source] sqlx::Error),

    #[error("Failed to list documents: {0}")]
    ListDocuments(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::InvalidMultipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_)
            | ApiError::SaveDocument(_)
            | ApiError::ListDocuments(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller; causes stay in the logs
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingFile => MISSING_FILE_MESSAGE,
            ApiError::InvalidMultipart(_) => INVALID_MULTIPART_MESSAGE,
            ApiError::Storage(_) => STORAGE_FAILED_MESSAGE,
            ApiError::SaveDocument(_) => SAVE_FAILED_MESSAGE,
            ApiError::ListDocuments(_) => LIST_FAILED_MESSAGE,
            ApiError::Internal(_) => INTERNAL_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `documents` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: i32,
    pub voornaam: Option<String>,
    pub familienaam: Option<String>,
    pub url: String,
}

/// Values for a new `documents` row; `id` is assigned by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub voornaam: Option<String>,
    pub familienaam: Option<String>,
    pub url: String,
}

/// Body of a successful `POST /upload`
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub document: Document,
}

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewDocument, UploadResponse};
use crate::naming::object_name;
use crate::storage::UploadRequest;
use crate::AppState;

/// Multipart field that carries the document
pub const FILE_FIELD: &str = "file";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload succesvol!";

/// The parts of an upload form this service reads
#[derive(Debug, Default)]
struct UploadForm {
    voornaam: Option<String>,
    familienaam: Option<String>,
    file: Option<UploadedFile>,
}

#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// Handle `POST /upload`
///
/// The row is only written after Cloudinary accepted the bytes. A failed insert
/// leaves the remote object in place without a record.
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    // A body that is not multipart at all simply carries no file.
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Upload without multipart body: {}", rejection);
        ApiError::MissingFile
    })?;

    let form = read_upload_form(&mut multipart).await?;

    tracing::info!(
        voornaam = ?form.voornaam,
        familienaam = ?form.familienaam,
        "Received upload request"
    );

    let file = form.file.ok_or(ApiError::MissingFile)?;

    let public_id = object_name(
        form.voornaam.as_deref(),
        form.familienaam.as_deref(),
        Utc::now().timestamp_millis(),
    );

    let request = UploadRequest {
        folder: state.upload.folder.clone(),
        public_id,
        overwrite: true,
        file_name: file.file_name,
    };

    let stored = state.storage.upload(request, file.data).await?;
    tracing::info!(
        public_id = %stored.public_id,
        bytes = ?stored.bytes,
        "Document stored"
    );

    let document = state
        .documents
        .create_document(NewDocument {
            voornaam: form.voornaam,
            familienaam: form.familienaam,
            url: stored.secure_url,
        })
        .await
        .map_err(|e| {
            tracing::warn!(
                "Object {} is stored but has no document record",
                stored.public_id
            );
            ApiError::SaveDocument(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            document,
        }),
    ))
}

async fn read_upload_form(multipart: &mut Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);

        match (name.as_deref(), file_name) {
            (Some(FILE_FIELD), Some(file_name)) if form.file.is_none() => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidMultipart(e.body_text()))?;
                tracing::debug!("File received: {} ({} bytes)", file_name, data.len());
                form.file = Some(UploadedFile { file_name, data });
            }
            (Some("voornaam"), None) => {
                form.voornaam = Some(read_text(field).await?);
            }
            (Some("familienaam"), None) => {
                form.familienaam = Some(read_text(field).await?);
            }
            (other, _) => {
                tracing::debug!("Ignoring multipart field: {:?}", other);
            }
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::InvalidMultipart(e.body_text()))
}

//! Cloudinary upload API client
//!
//! Uploads are signed server-side with the account's API secret, so the secret
//! never leaves this process. Only the `upload` endpoint is used.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::{debug, error, info};

use super::{ObjectStorage, StorageError, StoredObject, UploadRequest};

/// Cloudinary account settings
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    pub resource_type: String,
}

#[derive(Debug, Deserialize)]
struct UploadApiResponse {
    public_id: String,
    secure_url: String,
    #[serde(default)]
    bytes: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http_client: Client,
    upload_url: String,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self, StorageError> {
        info!("Initializing Cloudinary client for cloud: {}", config.cloud_name);

        let http_client = Client::builder().build()?;
        let upload_url = format!(
            "{}/{}/{}/upload",
            config.api_base.trim_end_matches('/'),
            config.cloud_name,
            config.resource_type
        );

        Ok(Self {
            config,
            http_client,
            upload_url,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    async fn upload_signed(
        &self,
        request: UploadRequest,
        body: Bytes,
        timestamp: i64,
    ) -> Result<StoredObject, StorageError> {
        debug!(
            "Uploading {} ({} bytes) to Cloudinary as {}/{}",
            request.file_name,
            body.len(),
            request.folder,
            request.public_id
        );

        let mut params: BTreeMap<&'static str, String> = BTreeMap::new();
        params.insert("folder", request.folder.clone());
        params.insert("overwrite", request.overwrite.to_string());
        params.insert("public_id", request.public_id.clone());
        params.insert("timestamp", timestamp.to_string());

        let signature = sign_params(&params, &self.config.api_secret);

        let length = body.len() as u64;
        let file_part = Part::stream_with_length(body, length).file_name(request.file_name);

        let mut form = Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (name, value) in params {
            form = form.text(name, value);
        }

        let response = self
            .http_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            error!("Cloudinary upload failed: {} - {}", status, message);
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadApiResponse = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        info!("File uploaded to Cloudinary: {}", parsed.public_id);

        Ok(StoredObject {
            public_id: parsed.public_id,
            secure_url: parsed.secure_url,
            bytes: parsed.bytes,
        })
    }
}

#[async_trait]
impl ObjectStorage for CloudinaryClient {
    async fn upload(
        &self,
        request: UploadRequest,
        body: Bytes,
    ) -> Result<StoredObject, StorageError> {
        let timestamp = chrono::Utc::now().timestamp();
        self.upload_signed(request, body, timestamp).await
    }
}

/// SHA-1 hex of `k=v` pairs joined by `&` in key order, followed by the API secret
pub fn sign_params(params: &BTreeMap<&'static str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

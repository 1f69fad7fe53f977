// Object storage for uploaded documents

pub mod cloudinary;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Placement of an object in remote storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub folder: String,
    pub public_id: String,
    pub overwrite: bool,
    /// Original file name from the multipart part, forwarded as the form file name
    pub file_name: String,
}

/// What the storage service reports back for a stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub public_id: String,
    pub secure_url: String,
    pub bytes: Option<u64>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),
}

/// Remote object storage the upload handler forwards file bytes to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` under `request` and resolve once the service has accepted it
    async fn upload(
        &self,
        request: UploadRequest,
        body: Bytes,
    ) -> Result<StoredObject, StorageError>;
}

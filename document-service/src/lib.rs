//! Document upload relay
//!
//! Accepts a multipart upload with `voornaam` and `familienaam`, stores the file
//! on Cloudinary and records the resulting URL in the `documents` table.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod naming;
pub mod routes;
pub mod storage;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use config::UploadConfig;
use db::DocumentRepository;
use storage::ObjectStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn ObjectStorage>,
    pub documents: Arc<dyn DocumentRepository>,
    pub upload: Arc<UploadConfig>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        documents: Arc<dyn DocumentRepository>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            storage,
            documents,
            upload: Arc::new(upload),
        }
    }
}

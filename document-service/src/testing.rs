//! In-memory collaborators and request builders for router tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use bytes::Bytes;
use serde_json::Value;

use crate::config::UploadConfig;
use crate::db::DocumentRepository;
use crate::models::{Document, NewDocument};
use crate::storage::{ObjectStorage, StorageError, StoredObject, UploadRequest};
use crate::AppState;

const BOUNDARY: &str = "document-service-test-boundary";

/// Storage double that keeps every accepted object in memory
#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<Vec<(String, Bytes)>>,
    fail: AtomicBool,
    panic: AtomicBool,
}

impl FakeStorage {
    pub fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn panic_on_upload(&self) {
        self.panic.store(true, Ordering::SeqCst);
    }

    /// `(public_id, bytes)` of every stored object, in upload order
    pub fn uploads(&self) -> Vec<(String, Bytes)> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        request: UploadRequest,
        body: Bytes,
    ) -> Result<StoredObject, StorageError> {
        if self.panic.load(Ordering::SeqCst) {
            panic!("storage double asked to panic");
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected {
                status: 500,
                message: "simulated outage".to_string(),
            });
        }

        let secure_url = format!(
            "https://res.cloudinary.com/test/image/upload/{}/{}",
            request.folder, request.public_id
        );
        let size = body.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .push((request.public_id.clone(), body));

        Ok(StoredObject {
            public_id: request.public_id,
            secure_url,
            bytes: Some(size),
        })
    }
}

/// Repository double with serial ids
#[derive(Default)]
pub struct InMemoryDocuments {
    rows: Mutex<Vec<Document>>,
    fail_inserts: AtomicBool,
    fail_queries: AtomicBool,
}

impl InMemoryDocuments {
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn fail_queries(&self) {
        self.fail_queries.store(true, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocuments {
    async fn create_document(&self, document: NewDocument) -> Result<Document, sqlx::Error> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }

        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        let created = Document {
            id,
            voornaam: document.voornaam,
            familienaam: document.familienaam,
            url: document.url,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, sqlx::Error> {
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed);
        }

        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn is_healthy(&self) -> bool {
        !self.fail_queries.load(Ordering::SeqCst)
    }
}

pub fn test_state() -> (AppState, Arc<FakeStorage>, Arc<InMemoryDocuments>) {
    let storage = Arc::new(FakeStorage::default());
    let documents = Arc::new(InMemoryDocuments::default());
    let state = AppState::new(storage.clone(), documents.clone(), UploadConfig::default());
    (state, storage, documents)
}

pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        data: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: &str, value: &str) -> Self {
        FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn file(name: &str, file_name: &str, data: &[u8]) -> Self {
        FormPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            data: data.to_vec(),
        }
    }
}

/// `POST /upload` with a hand-built multipart/form-data body
pub fn multipart_upload(parts: &[FormPart]) -> Request<Body> {
    let mut body = Vec::new();

    for part in parts {
        match part {
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!(
                        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                        BOUNDARY, name, value
                    )
                    .as_bytes(),
                );
            }
            FormPart::File {
                name,
                file_name,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        concat!(
                            "--{}\r\n",
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                            "Content-Type: application/octet-stream\r\n\r\n",
                        ),
                        BOUNDARY, name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

use async_trait::async_trait;
use shared::database::{self, DbPool};

use crate::models::{Document, NewDocument};

/// Access to the pre-existing `documents` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a row and return it as stored, including its assigned id
    async fn create_document(&self, document: NewDocument) -> Result<Document, sqlx::Error>;

    /// All rows, highest id first
    async fn list_documents(&self) -> Result<Vec<Document>, sqlx::Error>;

    async fn is_healthy(&self) -> bool;
}

/// PostgreSQL-backed repository
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: DbPool,
}

impl PgDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn create_document(&self, document: NewDocument) -> Result<Document, sqlx::Error> {
        let created = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (voornaam, familienaam, url)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(document.voornaam)
        .bind(document.familienaam)
        .bind(document.url)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created document record: id={}", created.id);
        Ok(created)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, sqlx::Error> {
        let documents = sqlx::query_as::<_, Document>(
            r#"
            SELECT * FROM documents
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    async fn is_healthy(&self) -> bool {
        database::health_check(&self.pool).await
    }
}

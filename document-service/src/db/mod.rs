// Persistence of document records

pub mod repository;

pub use repository::{DocumentRepository, PgDocumentRepository};

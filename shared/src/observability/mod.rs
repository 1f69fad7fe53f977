//! Observability setup shared by the service binaries

pub mod logging;

pub use logging::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Logging setup error: {0}")]
    Logging(String),
}

pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

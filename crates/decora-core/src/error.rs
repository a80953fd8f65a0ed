use thiserror::Error;
use uuid::Uuid;

use decora_catalog::CatalogError;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown area: {0}")]
    UnknownArea(String),
    #[error("Unknown entry: {0}")]
    UnknownEntry(Uuid),
    #[error("Unknown attachment: {0}")]
    UnknownAttachment(Uuid),
    #[error("Unknown product: {0}")]
    UnknownProduct(Uuid),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io(io) => CoreError::Io(io),
            CatalogError::Serde(msg) => CoreError::Serde(msg),
            CatalogError::Invalid(msg) => CoreError::Validation(msg),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No content extracted from {0}")]
    EmptyDocument(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

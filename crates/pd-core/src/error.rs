use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Duplicate document id: {0}")]
    DuplicateId(String),
    #[error("Dimension mismatch in document {id}: expected {expected}, got {got}")]
    DimensionMismatch { id: String, expected: usize, got: usize },
    #[error("Record {index} is missing required field `{field}`")]
    MissingField { field: &'static str, index: usize },
    #[error("Vectorizer returned {got} token lists for {expected} posts")]
    BatchSizeMismatch { expected: usize, got: usize },
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DedupError>;

use thiserror::Error;

/// Errors that can occur when loading static data.
#[derive(Debug, Error)]
pub enum DataError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

use shopfront_model::ModelError;
use thiserror::Error;

/// Failures reported by a layout backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Layout not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("No persisted layout is open")]
    NoLayout,
}

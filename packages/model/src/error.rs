//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Row {0} is nested inside another row")]
    NestedRow(String),

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),
}

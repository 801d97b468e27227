//! Error types for the editor

use thiserror::Error;

/// Failures surfaced to collaborators. Only loading/importing documents and
/// parsing configuration can fail; editing operations never do.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project has no cards")]
    NoCards,

    #[error("Duplicate card id: {0}")]
    DuplicateCardId(String),

    #[error("Duplicate element id: {0}")]
    DuplicateElementId(String),

    #[error("Empty id in {0}")]
    EmptyId(&'static str),
}

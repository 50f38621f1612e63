//! Error types for template selection and generation

use docx_core::DocxError;
use thiserror::Error;
use waiver_types::ValidationError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid template selection: {0}")]
    InvalidSelection(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template is not a valid document: {0}")]
    DocumentParse(#[source] DocxError),

    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

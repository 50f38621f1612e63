use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    #[error("Document package is missing part: {0}")]
    MissingPart(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DocxError {
    /// True for failures caused by the input bytes rather than by writing
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DocxError::ParseError(_) | DocxError::MissingPart(_))
    }
}

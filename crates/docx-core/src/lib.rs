//! Word-processing document codec
//!
//! This crate reads `.docx` packages into a structured model of paragraphs,
//! runs and tables, and writes the model back:
//! - `parse`: package bytes → [`Document`]
//! - `serialize`: [`Document`] → package bytes
//!
//! Only the main document body is interpreted. Styles, relationships,
//! headers, media and any XML the model does not understand are preserved.

pub mod document;
pub mod error;
pub mod model;
pub mod ooxml;
pub mod package;
pub mod xml;

pub use document::{parse, serialize, Document};
pub use error::DocxError;
pub use model::{
    Block, Body, Paragraph, ParagraphItem, RowItem, Run, RunItem, Table, TableCell, TableItem,
    TableRow,
};

/// MIME type for `.docx` downloads
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

//! OPC package (zip container) handling
//!
//! Parts are kept in archive order with their original bytes so that
//! everything except the main document part is written back untouched.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DocxError;
use crate::ooxml::W_NAMESPACE;
use crate::xml;

const ROOT_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";

const MINIMAL_CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const MINIMAL_ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// One file inside the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub data: Vec<u8>,
    pub compressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Read every file entry of a zip archive
    pub fn read(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocxError::ParseError(format!("Not a document package: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| DocxError::ParseError(format!("Bad package entry {}: {}", index, e)))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let compressed = file.compression() != CompressionMethod::Stored;
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| DocxError::ParseError(format!("Failed to read '{}': {}", name, e)))?;
            parts.push(Part {
                name,
                data,
                compressed,
            });
        }

        Ok(Self { parts })
    }

    /// Smallest valid package around an empty main document part
    pub fn minimal() -> Self {
        let empty_document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body/></w:document>"#,
            W_NAMESPACE
        );
        Self {
            parts: vec![
                Part {
                    name: "[Content_Types].xml".to_string(),
                    data: MINIMAL_CONTENT_TYPES.as_bytes().to_vec(),
                    compressed: true,
                },
                Part {
                    name: ROOT_RELS.to_string(),
                    data: MINIMAL_ROOT_RELS.as_bytes().to_vec(),
                    compressed: true,
                },
                Part {
                    name: DEFAULT_MAIN_PART.to_string(),
                    data: empty_document.into_bytes(),
                    compressed: true,
                },
            ],
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Locate the main document part through the package relationships
    ///
    /// Falls back to `word/document.xml` when the package has no root
    /// relationships part.
    pub fn main_part_name(&self) -> Result<String, DocxError> {
        let Some(rels) = self.part(ROOT_RELS) else {
            return Ok(DEFAULT_MAIN_PART.to_string());
        };

        let root = xml::parse(&rels.data)?;
        let main = root
            .elements()
            .filter(|e| e.name.ends_with("Relationship"))
            .find(|e| {
                e.attribute("Type")
                    .is_some_and(|t| t.ends_with("/officeDocument"))
            })
            .and_then(|e| e.attribute("Target"))
            .map(|target| target.trim_start_matches('/').to_string())
            .ok_or_else(|| DocxError::MissingPart("officeDocument relationship".into()));
        main
    }

    /// Write the package, substituting the data of one part
    pub fn write_with(&self, part_name: &str, data: &[u8]) -> Result<Vec<u8>, DocxError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for part in &self.parts {
            let method = if part.compressed {
                CompressionMethod::Deflated
            } else {
                CompressionMethod::Stored
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(part.name.as_str(), options)
                .map_err(|e| DocxError::SerializationError(e.to_string()))?;

            let bytes = if part.name == part_name {
                data
            } else {
                part.data.as_slice()
            };
            zip.write_all(bytes)
                .map_err(|e| DocxError::SerializationError(e.to_string()))?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| DocxError::SerializationError(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

//! Parsed word-processing document

use tracing::debug;

use crate::error::DocxError;
use crate::model::{Body, Paragraph, Table};
use crate::ooxml::{self, W_NAMESPACE};
use crate::package::Package;
use crate::xml::{self, XmlElement, XmlNode};

/// A document loaded from a `.docx` package
///
/// The body is exposed as a structured model; the rest of the main part and
/// every other package part are carried through to [`serialize`] unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    body: Body,
    package: Package,
    main_part: String,
    /// `w:document` root with the body element taken out
    root: XmlElement,
    body_index: usize,
    body_element: XmlElement,
}

impl Document {
    /// A fresh document with the given body, inside a minimal package
    pub fn new(body: Body) -> Self {
        Self {
            body,
            package: Package::minimal(),
            main_part: "word/document.xml".to_string(),
            root: XmlElement::new("w:document").with_attribute("xmlns:w", W_NAMESPACE),
            body_index: 0,
            body_element: XmlElement::new("w:body"),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Body-level paragraphs, in document order
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.paragraphs()
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        self.body.paragraphs_mut()
    }

    /// Body-level tables, in document order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.tables()
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.tables_mut()
    }

    pub fn plain_text(&self) -> String {
        self.body.plain_text()
    }

    pub fn package(&self) -> &Package {
        &self.package
    }
}

/// Parse `.docx` bytes into a [`Document`]
pub fn parse(bytes: &[u8]) -> Result<Document, DocxError> {
    let package = Package::read(bytes)?;
    let main_part = package.main_part_name()?;
    let part = package
        .part(&main_part)
        .ok_or_else(|| DocxError::MissingPart(main_part.clone()))?;

    let mut root = xml::parse(&part.data)?;
    if !root.is("w:document") {
        return Err(DocxError::ParseError(format!(
            "Main part root is <{}>, expected <w:document>",
            root.name
        )));
    }

    let body_index = root
        .children
        .iter()
        .position(|n| matches!(n, XmlNode::Element(e) if e.is("w:body")))
        .ok_or_else(|| DocxError::ParseError("Document has no <w:body>".into()))?;

    let mut body_element = match root.children.remove(body_index) {
        XmlNode::Element(e) => e,
        _ => return Err(DocxError::ParseError("Document has no <w:body>".into())),
    };
    let body = ooxml::body_from_nodes(std::mem::take(&mut body_element.children));

    debug!(
        parts = package.parts().len(),
        main_part = %main_part,
        blocks = body.blocks.len(),
        "Parsed document package"
    );

    Ok(Document {
        body,
        package,
        main_part,
        root,
        body_index,
        body_element,
    })
}

/// Serialize a [`Document`] back into `.docx` bytes
pub fn serialize(document: &Document) -> Result<Vec<u8>, DocxError> {
    let mut body_element = document.body_element.clone();
    body_element.children = ooxml::body_to_nodes(&document.body);

    let mut root = document.root.clone();
    let index = document.body_index.min(root.children.len());
    root.children.insert(index, XmlNode::Element(body_element));

    let main_xml = xml::write(&root)?;
    document.package.write_with(&document.main_part, &main_xml)
}

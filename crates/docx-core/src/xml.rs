//! Minimal owned XML tree
//!
//! WordprocessingML parts are read into this tree so that everything the
//! document model does not interpret is written back unchanged.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::DocxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified name, e.g. `w:p`
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|c| match c {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated character data of this element's direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Parse a complete XML part and return its root element
pub fn parse(xml: &[u8]) -> Result<XmlElement, DocxError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            DocxError::ParseError(format!(
                "XML error at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, XmlNode::Element(element))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DocxError::ParseError("Unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, XmlNode::Element(element))?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let value = text
                        .unescape()
                        .map_err(|e| DocxError::ParseError(e.to_string()))?;
                    parent.children.push(XmlNode::Text(value.into_owned()));
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    parent.children.push(XmlNode::CData(value));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    let value = String::from_utf8_lossy(&comment).into_owned();
                    parent.children.push(XmlNode::Comment(value));
                }
            }
            Event::Eof => break,
            // Declarations, processing instructions and doctypes are regenerated on write
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(DocxError::ParseError(format!(
            "Unclosed element <{}>",
            stack.last().map(|e| e.name.as_str()).unwrap_or_default()
        )));
    }

    root.ok_or_else(|| DocxError::ParseError("XML part has no root element".into()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, DocxError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| DocxError::ParseError(e.to_string()))?
        .to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocxError::ParseError(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| DocxError::ParseError(e.to_string()))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| DocxError::ParseError(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    node: XmlNode,
) -> Result<(), DocxError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            let XmlNode::Element(element) = node else {
                return Ok(());
            };
            if root.is_some() {
                return Err(DocxError::ParseError("Multiple root elements".into()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

/// Serialize a root element as a standalone UTF-8 XML part
pub fn write(root: &XmlElement) -> Result<Vec<u8>, DocxError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| DocxError::SerializationError(e.to_string()))?;
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), DocxError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => emit(writer, Event::Text(BytesText::new(t)))?,
            XmlNode::CData(t) => emit(writer, Event::CData(BytesCData::new(t.as_str())))?,
            XmlNode::Comment(t) => emit(writer, Event::Comment(BytesText::from_escaped(t.as_str())))?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DocxError> {
    writer
        .write_event(event)
        .map_err(|e| DocxError::SerializationError(e.to_string()))
}

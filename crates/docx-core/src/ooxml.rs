//! WordprocessingML element mapping
//!
//! Converts between `w:body` XML and the [`Body`] model. Names are matched
//! with the conventional `w:` prefix for the main namespace.

use crate::model::{
    Block, Body, Paragraph, ParagraphItem, RowItem, Run, RunItem, Table, TableCell, TableItem,
    TableRow,
};
use crate::xml::{XmlElement, XmlNode};

pub const W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub(crate) fn body_from_nodes(nodes: Vec<XmlNode>) -> Body {
    Body {
        blocks: blocks_from_nodes(nodes),
    }
}

pub(crate) fn body_to_nodes(body: &Body) -> Vec<XmlNode> {
    blocks_to_nodes(&body.blocks)
}

fn blocks_from_nodes(nodes: Vec<XmlNode>) -> Vec<Block> {
    nodes
        .into_iter()
        .map(|node| match node {
            XmlNode::Element(e) if e.is("w:p") => Block::Paragraph(paragraph_from_xml(e)),
            XmlNode::Element(e) if e.is("w:tbl") => Block::Table(table_from_xml(e)),
            other => Block::Other(other),
        })
        .collect()
}

fn paragraph_from_xml(element: XmlElement) -> Paragraph {
    let mut paragraph = Paragraph::new();
    for node in element.children {
        match node {
            XmlNode::Element(e) if e.is("w:pPr") && paragraph.properties.is_none() => {
                paragraph.properties = Some(e)
            }
            XmlNode::Element(e) if e.is("w:r") => {
                paragraph.content.push(ParagraphItem::Run(run_from_xml(e)))
            }
            other => paragraph.content.push(ParagraphItem::Other(other)),
        }
    }
    paragraph
}

fn run_from_xml(element: XmlElement) -> Run {
    let mut run = Run::default();
    for node in element.children {
        let XmlNode::Element(e) = node else {
            continue;
        };
        if e.is("w:rPr") && run.properties.is_none() {
            run.properties = Some(e);
        } else if e.is("w:t") {
            run.content.push(RunItem::Text(e.text()));
        } else if e.is("w:tab") {
            run.content.push(RunItem::Tab);
        } else if e.is("w:br") && is_line_break(&e) {
            run.content.push(RunItem::Break);
        } else {
            run.content.push(RunItem::Other(e));
        }
    }
    run
}

/// Page and column breaks are layout, not text
fn is_line_break(element: &XmlElement) -> bool {
    matches!(element.attribute("w:type"), None | Some("textWrapping"))
        && element.attribute("w:clear").is_none()
}

fn table_from_xml(element: XmlElement) -> Table {
    let content = element
        .children
        .into_iter()
        .map(|node| match node {
            XmlNode::Element(e) if e.is("w:tr") => TableItem::Row(row_from_xml(e)),
            other => TableItem::Other(other),
        })
        .collect();
    Table { content }
}

fn row_from_xml(element: XmlElement) -> TableRow {
    let content = element
        .children
        .into_iter()
        .map(|node| match node {
            XmlNode::Element(e) if e.is("w:tc") => RowItem::Cell(cell_from_xml(e)),
            other => RowItem::Other(other),
        })
        .collect();
    TableRow { content }
}

fn cell_from_xml(element: XmlElement) -> TableCell {
    let mut properties = None;
    let mut rest = Vec::with_capacity(element.children.len());
    for node in element.children {
        match node {
            XmlNode::Element(e) if e.is("w:tcPr") && properties.is_none() => properties = Some(e),
            other => rest.push(other),
        }
    }
    TableCell {
        properties,
        blocks: blocks_from_nodes(rest),
    }
}

fn blocks_to_nodes(blocks: &[Block]) -> Vec<XmlNode> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => XmlNode::Element(paragraph_to_xml(p)),
            Block::Table(t) => XmlNode::Element(table_to_xml(t)),
            Block::Other(node) => node.clone(),
        })
        .collect()
}

fn paragraph_to_xml(paragraph: &Paragraph) -> XmlElement {
    let mut element = XmlElement::new("w:p");
    if let Some(props) = &paragraph.properties {
        element.children.push(XmlNode::Element(props.clone()));
    }
    for item in &paragraph.content {
        element.children.push(match item {
            ParagraphItem::Run(run) => XmlNode::Element(run_to_xml(run)),
            ParagraphItem::Other(node) => node.clone(),
        });
    }
    element
}

fn run_to_xml(run: &Run) -> XmlElement {
    let mut element = XmlElement::new("w:r");
    if let Some(props) = &run.properties {
        element.children.push(XmlNode::Element(props.clone()));
    }
    for item in &run.content {
        let child = match item {
            RunItem::Text(text) if text.is_empty() => continue,
            RunItem::Text(text) => text_element(text),
            RunItem::Tab => XmlElement::new("w:tab"),
            RunItem::Break => XmlElement::new("w:br"),
            RunItem::Other(e) => e.clone(),
        };
        element.children.push(XmlNode::Element(child));
    }
    element
}

fn text_element(text: &str) -> XmlElement {
    let mut element = XmlElement::new("w:t");
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        element = element.with_attribute("xml:space", "preserve");
    }
    element.with_child(XmlNode::Text(text.to_string()))
}

fn table_to_xml(table: &Table) -> XmlElement {
    let mut element = XmlElement::new("w:tbl");
    for item in &table.content {
        element.children.push(match item {
            TableItem::Row(row) => XmlNode::Element(row_to_xml(row)),
            TableItem::Other(node) => node.clone(),
        });
    }
    element
}

fn row_to_xml(row: &TableRow) -> XmlElement {
    let mut element = XmlElement::new("w:tr");
    for item in &row.content {
        element.children.push(match item {
            RowItem::Cell(cell) => XmlNode::Element(cell_to_xml(cell)),
            RowItem::Other(node) => node.clone(),
        });
    }
    element
}

fn cell_to_xml(cell: &TableCell) -> XmlElement {
    let mut element = XmlElement::new("w:tc");
    if let Some(props) = &cell.properties {
        element.children.push(XmlNode::Element(props.clone()));
    }
    element.children.extend(blocks_to_nodes(&cell.blocks));
    // A cell must end with a paragraph
    if !matches!(cell.blocks.last(), Some(Block::Paragraph(_))) {
        element
            .children
            .push(XmlNode::Element(XmlElement::new("w:p")));
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;
    use pretty_assertions::assert_eq;

    fn body_of(xml_body: &str) -> Body {
        let doc = format!(
            r#"<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            W_NAMESPACE, xml_body
        );
        let root = xml::parse(doc.as_bytes()).unwrap();
        let body = root.elements().find(|e| e.is("w:body")).unwrap().clone();
        body_from_nodes(body.children)
    }

    #[test]
    fn test_fragmented_runs_are_read_in_order() {
        let body = body_of(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>
               <w:r><w:rPr><w:b/></w:rPr><w:t>{{Own</w:t></w:r>
               <w:proofErr w:type="spellStart"/>
               <w:r><w:t>erName}}</w:t></w:r></w:p>"#,
        );
        let paragraph = body.paragraphs().next().unwrap();
        assert!(paragraph.properties.is_some());
        assert_eq!(paragraph.run_count(), 2);
        assert_eq!(paragraph.text(), "{{OwnerName}}");
    }

    #[test]
    fn test_tabs_and_breaks_become_text() {
        let body = body_of(
            r#"<w:p><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>C</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        let run = body.paragraphs().next().unwrap().runs().next().unwrap();
        assert_eq!(run.text(), "A\tB\nC");
        assert!(matches!(run.content.last(), Some(RunItem::Other(e)) if e.is("w:br")));
    }

    #[test]
    fn test_tables_and_cells_are_structured() {
        let body = body_of(
            r#"<w:tbl><w:tblPr/><w:tr><w:tc><w:tcPr/><w:p><w:r><w:t>[OWNER]</w:t></w:r></w:p></w:tc>
               <w:tc><w:p/><w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc></w:tr></w:tbl>
               <w:sectPr/>"#,
        );
        assert_eq!(body.paragraphs().count(), 0);
        let table = body.tables().next().unwrap();
        assert_eq!(table.rows().count(), 1);
        assert_eq!(table.cell(0, 0).unwrap().text(), "[OWNER]");
        assert!(table.cell(0, 0).unwrap().properties.is_some());
        assert_eq!(table.cell(0, 1).unwrap().paragraphs().count(), 2);
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let body = body_of(
            r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:bookmarkStart w:id="0" w:name="x"/><w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve"> lead</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:sectPr><w:pgSz w:w="12240"/></w:sectPr>"#,
        );
        let nodes = body_to_nodes(&body);
        assert_eq!(body_from_nodes(nodes), body);
    }

    #[test]
    fn test_leading_space_is_preserved_on_write() {
        let run = Run::new(" Jane");
        let element = run_to_xml(&run);
        let text = element.elements().next().unwrap();
        assert_eq!(text.attribute("xml:space"), Some("preserve"));
        assert_eq!(text.text(), " Jane");
    }
}

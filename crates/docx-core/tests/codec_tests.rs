//! Package-level codec tests for docx-core
//!
//! Builds `.docx` archives the way Word lays them out (styles part, escaped
//! text, fragmented runs) and checks that parse/serialize keeps them intact.

use std::io::{Cursor, Write};

use docx_core::{parse, serialize, DocxError, Paragraph};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Title"/></w:styles>"#;

fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", STYLES),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[test]
fn test_parse_word_layout() {
    let bytes = docx_with_body(
        r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>CONDITIONAL WAIVER AND RELEASE ON PROGRESS PAYMENT</w:t></w:r></w:p><w:p><w:r><w:t xml:space="preserve">Owner: </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>[OWN</w:t></w:r><w:r><w:t>ER]</w:t></w:r></w:p>"#,
    );
    let doc = parse(&bytes).unwrap();

    let paragraphs: Vec<&Paragraph> = doc.paragraphs().collect();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].text(), "Owner: [OWNER]");
    assert_eq!(paragraphs[1].run_count(), 3);
}

#[test]
fn test_other_parts_survive_byte_for_byte() {
    let bytes = docx_with_body(r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#);
    let doc = parse(&bytes).unwrap();
    let out = serialize(&doc).unwrap();

    let reparsed = parse(&out).unwrap();
    assert_eq!(
        reparsed.package().part("word/styles.xml").unwrap().data,
        STYLES.as_bytes()
    );
    assert_eq!(reparsed.package().parts().len(), 4);
}

#[test]
fn test_section_properties_survive_edit() {
    let bytes = docx_with_body(r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>"#);
    let mut doc = parse(&bytes).unwrap();
    doc.paragraphs_mut().next().unwrap().set_text("after");

    let out = serialize(&doc).unwrap();
    let reparsed = parse(&out).unwrap();
    assert_eq!(reparsed.plain_text(), "after\n");
    assert_eq!(reparsed.body(), doc.body());
}

#[test]
fn test_missing_main_part_is_reported() {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("_rels/.rels", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(ROOT_RELS.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let err = parse(&bytes).unwrap_err();
    assert!(matches!(err, DocxError::MissingPart(ref p) if p == "word/document.xml"));
}

#[test]
fn test_malformed_document_xml_is_a_parse_error() {
    let bytes = docx_with_body("<w:p><w:r><w:t>unclosed</w:r></w:p>");
    assert!(matches!(parse(&bytes), Err(DocxError::ParseError(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reparsing_serialized_document_keeps_text(
        fragments in prop::collection::vec("[A-Za-z0-9 &<>\\[\\]{}\"']{0,12}", 1..6)
    ) {
        let runs: String = fragments
            .iter()
            .map(|f| format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(f)))
            .collect();
        let bytes = docx_with_body(&format!("<w:p>{}</w:p>", runs));

        let first = parse(&bytes).unwrap();
        let second = parse(&serialize(&first).unwrap()).unwrap();

        prop_assert_eq!(first.plain_text(), fragments.concat() + "\n");
        prop_assert_eq!(second.plain_text(), first.plain_text());
    }
}

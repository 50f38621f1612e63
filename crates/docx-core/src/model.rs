//! Structured document model
//!
//! A body is an ordered list of blocks. Paragraphs hold runs of text, tables
//! hold rows of cells, and cells hold blocks again. Anything the model does
//! not interpret (bookmarks, section properties, drawings, hyperlinks) is
//! kept as opaque XML in its original position.

use crate::xml::{XmlElement, XmlNode};

/// Document body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Other(XmlNode),
}

/// A paragraph: optional `w:pPr` followed by runs and preserved content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub properties: Option<XmlElement>,
    pub content: Vec<ParagraphItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphItem {
    Run(Run),
    Other(XmlNode),
}

/// A run of text sharing one set of run properties
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub properties: Option<XmlElement>,
    pub content: Vec<RunItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunItem {
    Text(String),
    Tab,
    Break,
    Other(XmlElement),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub content: Vec<TableItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableItem {
    Row(TableRow),
    Other(XmlNode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub content: Vec<RowItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowItem {
    Cell(TableCell),
    Other(XmlNode),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub properties: Option<XmlElement>,
    pub blocks: Vec<Block>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.blocks)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.blocks)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        tables_of(&self.blocks)
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        tables_of_mut(&mut self.blocks)
    }

    /// Plain text, one line per paragraph and per table row (cells tab-separated)
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        write_blocks_text(&self.blocks, &mut out);
        out
    }
}

fn paragraphs_of(blocks: &[Block]) -> impl Iterator<Item = &Paragraph> {
    blocks.iter().filter_map(|b| match b {
        Block::Paragraph(p) => Some(p),
        _ => None,
    })
}

fn paragraphs_of_mut(blocks: &mut [Block]) -> impl Iterator<Item = &mut Paragraph> {
    blocks.iter_mut().filter_map(|b| match b {
        Block::Paragraph(p) => Some(p),
        _ => None,
    })
}

fn tables_of(blocks: &[Block]) -> impl Iterator<Item = &Table> {
    blocks.iter().filter_map(|b| match b {
        Block::Table(t) => Some(t),
        _ => None,
    })
}

fn tables_of_mut(blocks: &mut [Block]) -> impl Iterator<Item = &mut Table> {
    blocks.iter_mut().filter_map(|b| match b {
        Block::Table(t) => Some(t),
        _ => None,
    })
}

fn write_blocks_text(blocks: &[Block], out: &mut String) {
    for block in blocks {
        match block {
            Block::Paragraph(p) => {
                out.push_str(&p.text());
                out.push('\n');
            }
            Block::Table(t) => {
                for row in t.rows() {
                    let cells: Vec<String> = row.cells().map(|c| c.text()).collect();
                    out.push_str(&cells.join("\t"));
                    out.push('\n');
                }
            }
            Block::Other(_) => {}
        }
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph with a single run
    pub fn with_text(text: &str) -> Self {
        Self::from_runs([text])
    }

    /// Paragraph with one run per fragment, as editors leave them after edits
    pub fn from_runs<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            properties: None,
            content: fragments
                .into_iter()
                .map(|s| ParagraphItem::Run(Run::new(s.as_ref())))
                .collect(),
        }
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.content.iter().filter_map(|item| match item {
            ParagraphItem::Run(r) => Some(r),
            _ => None,
        })
    }

    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut Run> {
        self.content.iter_mut().filter_map(|item| match item {
            ParagraphItem::Run(r) => Some(r),
            _ => None,
        })
    }

    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Logical text of all runs, concatenated
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    /// Replace the paragraph's text with a single text-bearing run
    ///
    /// The first run that carries text receives `text` and keeps its
    /// properties; the other text runs lose their text and are removed once
    /// empty. Runs without text (drawings, field characters) stay in place.
    pub fn set_text(&mut self, text: &str) {
        let target = self
            .content
            .iter()
            .position(|item| matches!(item, ParagraphItem::Run(r) if r.has_text()))
            .or_else(|| {
                self.content
                    .iter()
                    .position(|item| matches!(item, ParagraphItem::Run(_)))
            });

        let Some(target) = target else {
            self.content.push(ParagraphItem::Run(Run::new(text)));
            return;
        };

        let mut index = 0;
        self.content.retain_mut(|item| {
            let current = index;
            index += 1;
            match item {
                ParagraphItem::Run(run) if current == target => {
                    run.set_text(text);
                    true
                }
                ParagraphItem::Run(run) if run.has_text() => {
                    run.clear_text();
                    !run.content.is_empty()
                }
                _ => true,
            }
        });
    }
}

impl Run {
    pub fn new(text: &str) -> Self {
        let mut run = Self::default();
        run.set_text(text);
        run
    }

    /// Text with tabs as `\t` and line breaks as `\n`
    pub fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.content {
            match item {
                RunItem::Text(t) => out.push_str(t),
                RunItem::Tab => out.push('\t'),
                RunItem::Break => out.push('\n'),
                RunItem::Other(_) => {}
            }
        }
        out
    }

    pub fn has_text(&self) -> bool {
        self.content.iter().any(|item| match item {
            RunItem::Text(t) => !t.is_empty(),
            RunItem::Tab | RunItem::Break => true,
            RunItem::Other(_) => false,
        })
    }

    /// Replace text content, keeping non-text children
    pub fn set_text(&mut self, text: &str) {
        self.clear_text();
        let mut segment = String::new();
        for ch in text.chars() {
            match ch {
                '\t' | '\n' => {
                    if !segment.is_empty() {
                        self.content.push(RunItem::Text(std::mem::take(&mut segment)));
                    }
                    self.content.push(if ch == '\t' {
                        RunItem::Tab
                    } else {
                        RunItem::Break
                    });
                }
                '\r' => {}
                _ => segment.push(ch),
            }
        }
        if !segment.is_empty() {
            self.content.push(RunItem::Text(segment));
        }
    }

    pub fn clear_text(&mut self) {
        self.content.retain(|item| matches!(item, RunItem::Other(_)));
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of single-paragraph cells
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            content: rows
                .into_iter()
                .map(|cells| {
                    TableItem::Row(TableRow {
                        content: cells
                            .into_iter()
                            .map(|text| RowItem::Cell(TableCell::with_text(text.as_ref())))
                            .collect(),
                    })
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.content.iter().filter_map(|item| match item {
            TableItem::Row(r) => Some(r),
            _ => None,
        })
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut TableRow> {
        self.content.iter_mut().filter_map(|item| match item {
            TableItem::Row(r) => Some(r),
            _ => None,
        })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.rows().nth(row)?.cells().nth(column)
    }
}

impl TableRow {
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.content.iter().filter_map(|item| match item {
            RowItem::Cell(c) => Some(c),
            _ => None,
        })
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.content.iter_mut().filter_map(|item| match item {
            RowItem::Cell(c) => Some(c),
            _ => None,
        })
    }
}

impl TableCell {
    pub fn with_text(text: &str) -> Self {
        Self {
            properties: None,
            blocks: vec![Block::Paragraph(Paragraph::with_text(text))],
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        paragraphs_of(&self.blocks)
    }

    pub fn paragraphs_mut(&mut self) -> impl Iterator<Item = &mut Paragraph> {
        paragraphs_of_mut(&mut self.blocks)
    }

    /// Tables nested inside this cell
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        tables_of_mut(&mut self.blocks)
    }

    /// Text of the cell's paragraphs as one unit, separated by line breaks
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Paragraph groups of the cell, split by nested tables
    ///
    /// Each group is one text unit; its paragraphs join with line breaks.
    pub fn text_units(&self) -> Vec<String> {
        let mut units = Vec::new();
        let mut group: Option<Vec<String>> = None;
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => group.get_or_insert_with(Vec::new).push(p.text()),
                Block::Table(_) => {
                    if let Some(done) = group.take() {
                        units.push(done.join("\n"));
                    }
                }
                Block::Other(_) => {}
            }
        }
        if let Some(done) = group {
            units.push(done.join("\n"));
        }
        units
    }

    /// Rewrite paragraph group `unit` as a single paragraph carrying `text`
    ///
    /// Line breaks in `text` become `w:br` inside the group's first
    /// paragraph and the group's other paragraphs are removed. Nested tables
    /// and the other groups keep their place.
    pub fn set_unit_text(&mut self, unit: usize, text: &str) {
        let mut groups = 0;
        let mut current: Option<usize> = None;
        let mut written = false;
        self.blocks.retain_mut(|block| match block {
            Block::Paragraph(p) => {
                let group = *current.get_or_insert_with(|| {
                    groups += 1;
                    groups - 1
                });
                if group != unit {
                    true
                } else if written {
                    false
                } else {
                    written = true;
                    p.set_text(text);
                    true
                }
            }
            Block::Table(_) => {
                current = None;
                true
            }
            Block::Other(_) => true,
        });
        if !written && groups == 0 && unit == 0 {
            self.blocks
                .insert(0, Block::Paragraph(Paragraph::with_text(text)));
        }
    }

    /// Rewrite the cell's first paragraph group, see [`TableCell::set_unit_text`]
    pub fn set_text(&mut self, text: &str) {
        self.set_unit_text(0, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraph_text_spans_runs() {
        let p = Paragraph::from_runs(["{{Own", "erName}}", " signs"]);
        assert_eq!(p.run_count(), 3);
        assert_eq!(p.text(), "{{OwnerName}} signs");
    }

    #[test]
    fn test_set_text_collapses_to_one_run_keeping_first_formatting() {
        let mut p = Paragraph::from_runs(["a", "b", "c"]);
        let bold = XmlElement::new("w:rPr").with_child(XmlNode::Element(XmlElement::new("w:b")));
        if let Some(first) = p.runs_mut().next() {
            first.properties = Some(bold.clone());
        }

        p.set_text("replaced");
        assert_eq!(p.run_count(), 1);
        assert_eq!(p.text(), "replaced");
        assert_eq!(p.runs().next().unwrap().properties, Some(bold));
    }

    #[test]
    fn test_set_text_on_empty_paragraph_creates_run() {
        let mut p = Paragraph::new();
        p.set_text("hello");
        assert_eq!(p.run_count(), 1);
        assert_eq!(p.text(), "hello");
    }

    #[test]
    fn test_set_text_keeps_drawing_runs() {
        let drawing = Run {
            properties: None,
            content: vec![RunItem::Other(XmlElement::new("w:drawing"))],
        };
        let mut p = Paragraph {
            properties: None,
            content: vec![
                ParagraphItem::Run(Run::new("x")),
                ParagraphItem::Run(drawing.clone()),
                ParagraphItem::Run(Run::new("y")),
            ],
        };

        p.set_text("z");
        assert_eq!(p.text(), "z");
        assert_eq!(p.run_count(), 2);
        assert_eq!(p.runs().nth(1), Some(&drawing));
    }

    #[test]
    fn test_run_text_maps_tabs_and_breaks() {
        let run = Run::new("a\tb\nc");
        assert_eq!(
            run.content,
            vec![
                RunItem::Text("a".into()),
                RunItem::Tab,
                RunItem::Text("b".into()),
                RunItem::Break,
                RunItem::Text("c".into()),
            ]
        );
        assert_eq!(run.text(), "a\tb\nc");
    }

    #[test]
    fn test_cell_set_text_merges_paragraphs() {
        let mut cell = TableCell {
            properties: None,
            blocks: vec![
                Block::Paragraph(Paragraph::with_text("Owner:")),
                Block::Paragraph(Paragraph::with_text("[OWNER]")),
            ],
        };
        assert_eq!(cell.text(), "Owner:\n[OWNER]");

        cell.set_text("Owner:\nJane Doe");
        assert_eq!(cell.paragraphs().count(), 1);
        assert_eq!(cell.text(), "Owner:\nJane Doe");
    }

    #[test]
    fn test_cell_units_keep_order_around_nested_table() {
        let mut cell = TableCell {
            properties: None,
            blocks: vec![
                Block::Paragraph(Paragraph::with_text("before")),
                Block::Table(Table::from_rows([["inner"]])),
                Block::Paragraph(Paragraph::with_text("after [A]")),
                Block::Paragraph(Paragraph::with_text("tail")),
            ],
        };
        assert_eq!(cell.text_units(), vec!["before", "after [A]\ntail"]);

        cell.set_unit_text(1, "after 1\ntail");
        assert_eq!(cell.blocks.len(), 3);
        assert!(matches!(&cell.blocks[0], Block::Paragraph(p) if p.text() == "before"));
        assert!(matches!(cell.blocks[1], Block::Table(_)));
        assert!(matches!(&cell.blocks[2], Block::Paragraph(p) if p.text() == "after 1\ntail"));
    }

    #[test]
    fn test_cell_set_text_on_empty_cell_adds_paragraph() {
        let mut cell = TableCell {
            properties: None,
            blocks: Vec::new(),
        };
        assert!(cell.text_units().is_empty());
        cell.set_text("x");
        assert_eq!(cell.text(), "x");
    }

    #[test]
    fn test_table_from_rows_and_plain_text() {
        let body = Body::new()
            .with_paragraph(Paragraph::with_text("Title"))
            .with_table(Table::from_rows([["a", "b"], ["c", "d"]]));
        assert_eq!(body.plain_text(), "Title\na\tb\nc\td\n");
        assert_eq!(body.tables().next().unwrap().cell(1, 0).unwrap().text(), "c");
    }
}

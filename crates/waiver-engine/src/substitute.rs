//! Placeholder substitution over a parsed document
//!
//! Editors fragment text into runs arbitrarily, so a token like
//! `{{OwnerName}}` may be stored as `{{Own` + `erName}}`. Matching therefore
//! runs over each paragraph's concatenated text, and a paragraph that changed
//! is rewritten as a single run. Table cells are handled the same way with
//! the cell's paragraphs as one unit (nested tables split a cell into
//! several units).
//!
//! Each key is replaced in the first syntax, in [`TokenSyntax::PRIORITY`]
//! order, that occurs in the unit, so a label like `OWNER:` survives next to
//! `[OWNER]`. All keys are matched against the original text in one pass and
//! a replacement value is never scanned again. Where matches of different
//! keys overlap, the leftmost wins, then syntax priority, then the longest
//! match, then map order. Bare keys only match as whole words.

use std::borrow::Cow;

use docx_core::{Body, Document, Table};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::placeholder::{Placeholder, PlaceholderMap, TokenSyntax};

lazy_static! {
    static ref LEFTOVER_TOKEN: Regex =
        Regex::new(r"\{\{\s*[A-Za-z][A-Za-z0-9_ ]*\s*\}\}|\[[A-Za-z][A-Za-z0-9_ ]*\]|\{[A-Za-z][A-Za-z0-9_]*\}")
            .unwrap();
}

/// Counts of rewritten text units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    pub paragraphs: usize,
    pub cells: usize,
}

impl SubstitutionReport {
    pub fn total(&self) -> usize {
        self.paragraphs + self.cells
    }
}

struct Candidate<'m> {
    start: usize,
    end: usize,
    rank: usize,
    order: usize,
    value: &'m str,
}

/// Replace every placeholder occurrence in `text`
///
/// Returns `Cow::Borrowed` when nothing matched. Keys that are not in the map
/// are never touched.
pub fn substitute_text<'a>(text: &'a str, placeholders: &PlaceholderMap) -> Cow<'a, str> {
    if text.is_empty() || placeholders.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut candidates = Vec::new();
    for (order, (key, value)) in placeholders.iter().enumerate() {
        let Some((syntax, token)) = first_present(&Placeholder::parse(key), text) else {
            continue;
        };
        for (start, _) in text.match_indices(token.as_str()) {
            let end = start + token.len();
            if syntax == TokenSyntax::Bare && !on_word_boundary(text, start, end) {
                continue;
            }
            candidates.push(Candidate {
                start,
                end,
                rank: syntax.rank(),
                order,
                value,
            });
        }
    }

    if candidates.is_empty() {
        return Cow::Borrowed(text);
    }

    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.rank.cmp(&b.rank))
            .then(b.end.cmp(&a.end))
            .then(a.order.cmp(&b.order))
    });

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for candidate in candidates {
        if candidate.start < cursor {
            continue;
        }
        out.push_str(&text[cursor..candidate.start]);
        out.push_str(candidate.value);
        cursor = candidate.end;
    }
    out.push_str(&text[cursor..]);

    Cow::Owned(out)
}

/// Substitute placeholders in all paragraphs and table cells of `document`
pub fn substitute<'d>(document: &'d mut Document, placeholders: &PlaceholderMap) -> &'d mut Document {
    substitute_with_report(document, placeholders);
    document
}

/// Like [`substitute`], reporting how many paragraphs and cells changed
pub fn substitute_with_report(
    document: &mut Document,
    placeholders: &PlaceholderMap,
) -> SubstitutionReport {
    let report = substitute_body(document.body_mut(), placeholders);
    debug!(
        paragraphs = report.paragraphs,
        cells = report.cells,
        keys = placeholders.len(),
        "Substituted placeholders"
    );
    report
}

fn substitute_body(body: &mut Body, placeholders: &PlaceholderMap) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();

    for paragraph in body.paragraphs_mut() {
        let text = paragraph.text();
        if let Some(rewritten) = changed(&text, placeholders) {
            paragraph.set_text(&rewritten);
            report.paragraphs += 1;
        }
    }

    for table in body.tables_mut() {
        report.cells += substitute_table(table, placeholders);
    }

    report
}

fn substitute_table(table: &mut Table, placeholders: &PlaceholderMap) -> usize {
    let mut cells = 0;
    for row in table.rows_mut() {
        for cell in row.cells_mut() {
            let mut touched = false;
            for (unit, text) in cell.text_units().iter().enumerate() {
                if let Some(rewritten) = changed(text, placeholders) {
                    cell.set_unit_text(unit, &rewritten);
                    touched = true;
                }
            }
            if touched {
                cells += 1;
            }
            for nested in cell.tables_mut() {
                cells += substitute_table(nested, placeholders);
            }
        }
    }
    cells
}

/// The key's token in the highest-priority syntax that occurs in `text`
fn first_present(placeholder: &Placeholder, text: &str) -> Option<(TokenSyntax, String)> {
    placeholder.tokens().into_iter().find(|(syntax, token)| {
        text.match_indices(token.as_str()).any(|(start, _)| {
            *syntax != TokenSyntax::Bare || on_word_boundary(text, start, start + token.len())
        })
    })
}

/// Bare tokens must not touch other identifier characters, so `DATE` never
/// matches inside `UPDATE` or `[WORK_THROUGH_DATE]`.
fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    !text[..start].chars().next_back().is_some_and(is_word)
        && !text[end..].chars().next().is_some_and(is_word)
}

fn changed(text: &str, placeholders: &PlaceholderMap) -> Option<String> {
    match substitute_text(text, placeholders) {
        Cow::Owned(rewritten) if rewritten != text => Some(rewritten),
        _ => None,
    }
}

/// Bracketed and braced tokens still present in the document, in order of
/// first appearance
pub fn unresolved_tokens(document: &Document) -> Vec<String> {
    let text = document.plain_text();
    let mut tokens: Vec<String> = Vec::new();
    for m in LEFTOVER_TOKEN.find_iter(&text) {
        if !tokens.iter().any(|t| t == m.as_str()) {
            tokens.push(m.as_str().to_string());
        }
    }
    tokens
}

//! Worksheet XML to dense rows of cell text.

use super::shared_strings::SharedStrings;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};

/// Widest sheet a workbook can declare (column `XFD`).
pub const MAX_COLUMNS: usize = 16_384;

/// Where a cell's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Index into the shared strings table (`t="s"`)
    SharedString,
    /// Literal value or inline string
    Inline,
    /// Cached result of a formula
    FormulaCached,
    /// Formula source text, used because no cached result was stored
    FormulaText,
}

/// A single cell as found in the sheet XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    /// Zero-based column index
    pub column: usize,
    /// Resolved text
    pub text: String,
    /// Provenance of `text`
    pub kind: CellKind,
}

/// Rows extracted from one worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRows {
    /// Dense rows in document order; the first is the header row.
    pub rows: Vec<Vec<String>>,
    /// Cells whose text was taken from formula source instead of a cached value.
    pub formula_fallbacks: usize,
}

/// Convert a cell reference such as `"AA12"` to a zero-based column index.
///
/// Only the letters are considered (case-insensitive). Returns `None` when
/// the reference has no letters or overflows.
pub fn column_index(reference: &str) -> Option<usize> {
    let mut index: usize = 0;
    let mut seen = false;

    for ch in reference.chars().filter(char::is_ascii_alphabetic) {
        let digit = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        index = index.checked_mul(26)?.checked_add(digit)?;
        seen = true;
    }

    if seen {
        Some(index - 1)
    } else {
        None
    }
}

/// Per-cell parse state.
#[derive(Default)]
struct CellState {
    reference: Option<String>,
    cell_type: Option<String>,
    value: String,
    inline_text: String,
    formula: Option<String>,
}

impl CellState {
    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let mut state = CellState::default();
        for attr in e.attributes() {
            let attr = attr?;
            let value = attr
                .unescape_value()
                .map_err(|err| Error::XmlParse(err.to_string()))?;
            match attr.key.local_name().as_ref() {
                b"r" => state.reference = Some(value.into_owned()),
                b"t" => state.cell_type = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(state)
    }

    /// Resolve the cell's text. Returns `None` for cells that cannot be placed.
    fn finish(self, shared_strings: &SharedStrings) -> Option<RawCell> {
        let reference = match self.reference.as_deref() {
            Some(r) => r,
            None => {
                tracing::warn!("skipping cell without a reference attribute");
                return None;
            }
        };
        let column = match column_index(reference) {
            Some(c) if c < MAX_COLUMNS => c,
            _ => {
                tracing::warn!(reference, "skipping cell with an unusable reference");
                return None;
            }
        };

        let (mut text, mut kind) = match self.cell_type.as_deref() {
            Some("s") => (
                shared_strings.resolve(&self.value).to_string(),
                CellKind::SharedString,
            ),
            Some("inlineStr") if self.value.is_empty() => (self.inline_text, CellKind::Inline),
            _ => (self.value, CellKind::Inline),
        };

        if let Some(formula) = self.formula {
            if text.is_empty() && !formula.is_empty() {
                tracing::warn!(reference, "cell has no cached value; using formula text");
                text = formula;
                kind = CellKind::FormulaText;
            } else if kind == CellKind::Inline {
                kind = CellKind::FormulaCached;
            }
        }

        Some(RawCell { column, text, kind })
    }
}

/// Which element's text is currently being collected.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Formula,
    InlineText,
}

/// Expand sparse cells into a dense row.
///
/// The row length is one past the highest referenced column; gaps are `""`.
/// Returns `None` for a row without cells.
pub fn densify(cells: Vec<RawCell>) -> Option<Vec<String>> {
    let max = cells.iter().map(|c| c.column).max()?;
    let mut row = vec![String::new(); max + 1];
    for cell in cells {
        row[cell.column] = cell.text;
    }
    Some(row)
}

/// Parse a worksheet into dense rows of text.
///
/// Shared-string cells are resolved through `shared_strings`. Rows with no
/// cells are skipped.
pub fn extract_rows(xml: &str, shared_strings: &SharedStrings) -> Result<SheetRows> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut result = SheetRows::default();
    let mut row_cells: Option<Vec<RawCell>> = None;
    let mut cell: Option<CellState> = None;
    let mut capture = Capture::None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"row" => row_cells = Some(Vec::new()),
                b"c" if row_cells.is_some() => cell = Some(CellState::from_start(e)?),
                b"v" if cell.is_some() => capture = Capture::Value,
                b"f" => {
                    if let Some(state) = cell.as_mut() {
                        state.formula.get_or_insert_with(String::new);
                        capture = Capture::Formula;
                    }
                }
                b"t" if cell.is_some() => capture = Capture::InlineText,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(cells) = row_cells.as_mut() {
                        if let Some(raw) = CellState::from_start(e)?.finish(shared_strings) {
                            cells.push(raw);
                        }
                    }
                }
                b"f" => {
                    if let Some(state) = cell.as_mut() {
                        state.formula.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if capture != Capture::None => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::XmlParse(err.to_string()))?;
                if let Some(state) = cell.as_mut() {
                    match capture {
                        Capture::Value => state.value.push_str(&text),
                        Capture::Formula => {
                            state.formula.get_or_insert_with(String::new).push_str(&text)
                        }
                        Capture::InlineText => state.inline_text.push_str(&text),
                        Capture::None => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" | b"f" | b"t" => capture = Capture::None,
                b"c" => {
                    capture = Capture::None;
                    if let (Some(state), Some(cells)) = (cell.take(), row_cells.as_mut()) {
                        if let Some(raw) = state.finish(shared_strings) {
                            cells.push(raw);
                        }
                    }
                }
                b"row" => {
                    if let Some(cells) = row_cells.take() {
                        result.formula_fallbacks += cells
                            .iter()
                            .filter(|c| c.kind == CellKind::FormulaText)
                            .count();
                        if let Some(row) = densify(cells) {
                            result.rows.push(row);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        rows = result.rows.len(),
        formula_fallbacks = result.formula_fallbacks,
        "extracted worksheet rows"
    );
    Ok(result)
}

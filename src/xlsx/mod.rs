//! Minimal XLSX reading: shared strings, sheet resolution and row extraction.
//!
//! Only what an ingestion run needs is parsed. Styles, merged cells and
//! formula evaluation are out of scope.
//!
//! # Example
//!
//! ```no_run
//! use sheetpulse::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("export.xlsx")?;
//! println!("Sheets: {:?}", reader.sheet_names());
//!
//! let sheet = reader.read_rows("merged_data-all")?;
//! println!("{} rows", sheet.rows.len());
//! # Ok::<(), sheetpulse::Error>(())
//! ```

mod parser;
mod shared_strings;
mod sheet;
mod workbook;

pub use parser::XlsxReader;
pub use shared_strings::SharedStrings;
pub use sheet::{column_index, densify, extract_rows, CellKind, RawCell, SheetRows, MAX_COLUMNS};
pub use workbook::{SheetEntry, SheetMap, WORKBOOK_PART, WORKBOOK_RELS_PART};

//! XLSX reader tying the container to sheet extraction.

use crate::container::OoxmlContainer;
use crate::error::Result;
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::sheet::{extract_rows, SheetRows};
use super::workbook::{SheetEntry, SheetMap};

/// Path of the shared strings part.
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Reader for the worksheets of one XLSX workbook.
///
/// The container, shared strings and sheet map are loaded once when the
/// reader is built and are read-only afterwards.
pub struct XlsxReader {
    container: OoxmlContainer,
    shared_strings: SharedStrings,
    sheets: SheetMap,
}

impl XlsxReader {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a reader from a container.
    pub fn from_container(container: OoxmlContainer) -> Result<Self> {
        // A workbook without any text cells has no shared strings part.
        let shared_strings = match container.read_optional_xml(SHARED_STRINGS_PART)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::default(),
        };

        let sheets = SheetMap::load(&container)?;

        Ok(Self {
            container,
            shared_strings,
            sheets,
        })
    }

    /// Extract the dense rows of the named sheet.
    pub fn read_rows(&self, sheet_name: &str) -> Result<SheetRows> {
        let path = self.sheets.path_of(sheet_name)?;
        let xml = self.container.read_xml(path)?;
        let rows = extract_rows(&xml, &self.shared_strings)?;

        if rows.formula_fallbacks > 0 {
            tracing::warn!(
                sheet = sheet_name,
                cells = rows.formula_fallbacks,
                "cells without cached values were filled with formula text"
            );
        }

        Ok(rows)
    }

    /// Get a reference to the container.
    pub fn container(&self) -> &OoxmlContainer {
        &self.container
    }

    /// Get the shared strings table.
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Get the declared sheets in manifest order.
    pub fn sheets(&self) -> &[SheetEntry] {
        self.sheets.sheets()
    }

    /// Get sheet names.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.names()
    }
}

impl std::fmt::Debug for XlsxReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxReader")
            .field("sheets", &self.sheets.names())
            .field("shared_strings", &self.shared_strings.len())
            .finish()
    }
}

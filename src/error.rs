//! Error types for the sheetpulse library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetpulse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an ingestion run.
///
/// Malformed cell values are never reported here; they coerce to absent
/// values instead. Everything in this enum is structural and fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source workbook does not exist.
    #[error("Source workbook not found: {0}")]
    SourceNotFound(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A part required by the reader is absent from the container.
    #[error("Part not found in container: {0}")]
    PartNotFound(String),

    /// The requested worksheet is not declared in the workbook manifest.
    #[error("Sheet '{sheet}' not found. Available: {}", available.join(", "))]
    SheetNotFound {
        /// Requested sheet name
        sheet: String,
        /// Sheet names the workbook does declare, sorted
        available: Vec<String>,
    },

    /// The header row lacks one or more required columns.
    #[error("Worksheet is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Error while serializing output.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

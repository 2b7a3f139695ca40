//! # sheetpulse
//!
//! Normalize spreadsheet interaction logs into typed JSON datasets.
//!
//! An XLSX workbook is read without a general-purpose spreadsheet library:
//! the ZIP container is opened, shared strings and the chosen worksheet are
//! parsed, headers are mapped to canonical columns, and loosely-typed cell
//! text is coerced into dates, booleans and numbers using the spreadsheet
//! serial-date convention.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetpulse::{ingest_file, IngestOptions};
//!
//! let options = IngestOptions::new()
//!     .with_sheet("merged_data-all")
//!     .with_exclude(["p266"]);
//!
//! let output = ingest_file("export.xlsx", &options)?;
//! for dataset in &output.datasets {
//!     let json = sheetpulse::render::to_json(dataset, options.json_format)?;
//!     std::fs::write(format!("{}.json", dataset.meta.dataset), json)?;
//! }
//! # Ok::<(), sheetpulse::Error>(())
//! ```
//!
//! ## Lower-level APIs
//!
//! ```no_run
//! use sheetpulse::ingest::{normalize_all, parse_interactions};
//! use sheetpulse::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("export.xlsx")?;
//! let sheet = reader.read_rows("merged_data-all")?;
//! let records = parse_interactions(&sheet.rows)?;
//! let interactions = normalize_all(&records);
//! # Ok::<(), sheetpulse::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod ingest;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::OoxmlContainer;
pub use error::{Error, Result};
pub use ingest::{IngestOptions, IngestOutput};
pub use model::{
    Dataset, DatasetMetadata, InteractionRecord, NormalizedInteraction, ParticipantSummary,
};
pub use render::JsonFormat;
pub use xlsx::XlsxReader;

use std::path::Path;

/// Ingest a workbook file.
///
/// The path, as given, is recorded as the datasets' source workbook.
///
/// # Example
///
/// ```no_run
/// use sheetpulse::{ingest_file, IngestOptions};
///
/// let output = ingest_file("export.xlsx", &IngestOptions::default())?;
/// println!("{} records", output.datasets[0].meta.record_count);
/// # Ok::<(), sheetpulse::Error>(())
/// ```
pub fn ingest_file(path: impl AsRef<Path>, options: &IngestOptions) -> Result<IngestOutput> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::SourceNotFound(path.display().to_string()));
    }

    let reader = XlsxReader::open(path)?;
    ingest::ingest_reader(&reader, &path.display().to_string(), options)
}

/// Ingest a workbook held in memory.
///
/// `source_workbook` names the source in dataset metadata.
pub fn ingest_bytes(
    data: &[u8],
    source_workbook: &str,
    options: &IngestOptions,
) -> Result<IngestOutput> {
    let reader = XlsxReader::from_bytes(data.to_vec())?;
    ingest::ingest_reader(&reader, source_workbook, options)
}

/// List the sheet names declared by a workbook file, in manifest order.
pub fn sheet_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let reader = XlsxReader::open(path)?;
    Ok(reader.sheet_names().into_iter().map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source() {
        let err = ingest_file("does/not/exist.xlsx", &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
        assert_eq!(
            err.to_string(),
            "Source workbook not found: does/not/exist.xlsx"
        );
    }

    #[test]
    fn test_bytes_that_are_not_a_workbook() {
        let err = ingest_bytes(b"not a zip", "memory", &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }
}

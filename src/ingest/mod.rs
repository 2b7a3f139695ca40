//! Interaction ingestion: worksheet rows to typed datasets.
//!
//! The pipeline runs strictly in order: header schema, raw records, typed
//! interactions, then per-dataset aggregation.
//!
//! # Example
//!
//! ```no_run
//! use sheetpulse::ingest::{ingest_reader, IngestOptions};
//! use sheetpulse::xlsx::XlsxReader;
//!
//! let reader = XlsxReader::open("export.xlsx")?;
//! let options = IngestOptions::new().with_exclude(["p266"]);
//! let output = ingest_reader(&reader, "export.xlsx", &options)?;
//!
//! for dataset in &output.datasets {
//!     println!("{}: {} records", dataset.meta.dataset, dataset.meta.record_count);
//! }
//! # Ok::<(), sheetpulse::Error>(())
//! ```

mod aggregate;
mod coerce;
mod normalize;
mod options;
mod records;
mod schema;

pub use aggregate::{
    build_dataset, build_participant_summaries, compute_last_updated, filter_interactions,
};
pub use coerce::{
    non_empty, normalize_subcategory, parse_bool, parse_float, parse_int, serial_to_date,
    serial_to_timestamp, EPOCH_OFFSET_DAYS,
};
pub use normalize::{normalize_all, normalize_interaction};
pub use options::{IngestOptions, DEFAULT_DATASET_PREFIX, DEFAULT_SHEET};
pub use records::parse_interactions;
pub use schema::{normalize_column_name, Column, ColumnSchema, COLUMN_ALIASES, REQUIRED_COLUMNS};

use crate::error::Result;
use crate::model::Dataset;
use crate::xlsx::XlsxReader;

/// Result of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOutput {
    /// `<prefix>_all`, followed by `<prefix>_exclude` when exclusions were given
    pub datasets: Vec<Dataset>,
    /// Cells whose text came from formula source rather than a cached value
    pub formula_fallbacks: usize,
}

impl IngestOutput {
    /// Look up a dataset by key.
    pub fn dataset(&self, key: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.meta.dataset == key)
    }
}

/// Run the full pipeline over the configured sheet of an open workbook.
///
/// `source_workbook` is recorded verbatim in each dataset's metadata.
pub fn ingest_reader(
    reader: &XlsxReader,
    source_workbook: &str,
    options: &IngestOptions,
) -> Result<IngestOutput> {
    let sheet = reader.read_rows(&options.sheet)?;
    let records = parse_interactions(&sheet.rows)?;
    let normalized = normalize_all(&records);
    let generated_at = options.resolve_generated_at();

    let mut datasets = Vec::with_capacity(2);
    if !options.exclude.is_empty() {
        let trimmed = filter_interactions(&normalized, &options.exclude);
        tracing::debug!(
            excluded = normalized.len() - trimmed.len(),
            "applied participant exclusions"
        );
        datasets.push(build_dataset(
            options.all_dataset_key(),
            normalized,
            source_workbook,
            generated_at,
        ));
        datasets.push(build_dataset(
            options.exclude_dataset_key(),
            trimmed,
            source_workbook,
            generated_at,
        ));
    } else {
        datasets.push(build_dataset(
            options.all_dataset_key(),
            normalized,
            source_workbook,
            generated_at,
        ));
    }

    Ok(IngestOutput {
        datasets,
        formula_fallbacks: sheet.formula_fallbacks,
    })
}

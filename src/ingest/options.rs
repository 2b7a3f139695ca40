//! Ingestion options configuration.

use crate::render::JsonFormat;
use chrono::{DateTime, SubsecRound, Utc};

/// Worksheet read when none is configured.
pub const DEFAULT_SHEET: &str = "merged_data-all";

/// Dataset file prefix used when none is configured.
pub const DEFAULT_DATASET_PREFIX: &str = "dataset";

/// Options for an ingestion run.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOptions {
    /// Worksheet holding the interaction rows
    pub sheet: String,

    /// Prefix for dataset keys (`<prefix>_all`, `<prefix>_exclude`)
    pub dataset_prefix: String,

    /// Participant keys left out of the exclusion dataset (case-insensitive)
    pub exclude: Vec<String>,

    /// Fixed generation time; `None` means "now"
    pub generated_at: Option<DateTime<Utc>>,

    /// JSON layout for rendered datasets
    pub json_format: JsonFormat,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_SHEET.to_string(),
            dataset_prefix: DEFAULT_DATASET_PREFIX.to_string(),
            exclude: Vec::new(),
            generated_at: None,
            json_format: JsonFormat::Pretty,
        }
    }
}

impl IngestOptions {
    /// Create new ingestion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// Set the dataset key prefix.
    pub fn with_dataset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dataset_prefix = prefix.into();
        self
    }

    /// Add participants to exclude from the secondary dataset.
    pub fn with_exclude<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(participants.into_iter().map(Into::into));
        self
    }

    /// Pin the generation timestamp.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Key of the dataset holding every record.
    pub fn all_dataset_key(&self) -> String {
        format!("{}_all", self.dataset_prefix)
    }

    /// Key of the dataset with excluded participants removed.
    pub fn exclude_dataset_key(&self) -> String {
        format!("{}_exclude", self.dataset_prefix)
    }

    /// Generation timestamp to stamp on datasets, whole seconds.
    pub fn resolve_generated_at(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now).trunc_subsecs(0)
    }
}

//! JSON renderer implementation.

use crate::error::Result;
use crate::model::Dataset;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a dataset to JSON.
pub fn to_json(dataset: &Dataset, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(dataset)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(dataset)?,
    };
    Ok(json)
}

/// Convert a dataset to JSON with default formatting.
pub fn to_json_default(dataset: &Dataset) -> Result<String> {
    to_json(dataset, JsonFormat::Pretty)
}

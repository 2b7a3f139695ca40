//! Output rendering for datasets.
//!
//! # Example
//!
//! ```no_run
//! use sheetpulse::{ingest_file, render::*, IngestOptions};
//!
//! let output = ingest_file("export.xlsx", &IngestOptions::default())?;
//! let json = to_json(&output.datasets[0], JsonFormat::Pretty)?;
//! # Ok::<(), sheetpulse::Error>(())
//! ```

mod json;

pub use json::{to_json, to_json_default, JsonFormat};

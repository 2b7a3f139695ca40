//! Interaction record structures.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One worksheet row, keyed by canonical column.
///
/// Text fields hold the trimmed cell text and are empty when the column is
/// absent or blank. Date serials and the time fraction are parsed to numbers
/// here; unparseable text leaves them `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionRecord {
    /// Message identifier
    pub message_id: String,
    /// Participant key
    pub participant: String,
    /// Message date as a spreadsheet serial
    pub message_date_serial: Option<f64>,
    /// Time of day as a fraction of a day
    pub message_time_fraction: Option<f64>,
    /// Day-of-week label
    pub day_of_week: String,
    /// Category label
    pub category: String,
    /// Free-form "other" label, source of the subcategory
    pub other_label: String,
    /// Why the category was chosen
    pub category_justification: String,
    /// Satisfaction flag as written
    pub satisfied_raw: String,
    /// Why the participant was (not) satisfied
    pub satisfaction_justification: String,
    /// Registration date as a spreadsheet serial
    pub registration_date_serial: Option<f64>,
    /// Study week as written
    pub study_week_raw: String,
    /// Response latency in seconds as written
    pub response_latency_raw: String,
    /// Emergency-response flag as written
    pub emergency_response_raw: String,
    /// Input cost as written
    pub input_cost_raw: String,
    /// Output cost as written
    pub output_cost_raw: String,
    /// Total cost as written
    pub total_cost_raw: String,
}

/// Typed projection of an [`InteractionRecord`].
///
/// Every field is always serialized; absent values become `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInteraction {
    /// Message identifier
    pub message_id: String,

    /// Participant key
    pub participant: String,

    /// Calendar date of the message
    pub message_date: Option<NaiveDate>,

    /// Time of day as a fraction of a day, as stored in the sheet
    pub message_time_fraction: Option<f64>,

    /// Date and time of the message, whole seconds
    pub occurred_at: Option<NaiveDateTime>,

    /// Day-of-week label
    pub day_of_week: Option<String>,

    /// Category label
    pub category: Option<String>,

    /// Derived from the "other" label; placeholder values collapse to `None`
    pub subcategory: Option<String>,

    /// Why the category was chosen
    pub category_justification: Option<String>,

    /// Whether the participant was satisfied
    pub satisfied: Option<bool>,

    /// Why the participant was (not) satisfied
    pub satisfaction_justification: Option<String>,

    /// Participant registration date
    pub registration_date: Option<NaiveDate>,

    /// Study week, truncated to a whole number
    pub study_week: Option<i64>,

    /// Response latency in seconds
    pub response_latency_seconds: Option<f64>,

    /// Whether the message triggered an emergency response
    pub emergency_response: Option<bool>,

    /// Input cost
    pub input_cost: Option<f64>,

    /// Output cost
    pub output_cost: Option<f64>,

    /// Total cost as recorded in the sheet
    pub total_cost: Option<f64>,
}

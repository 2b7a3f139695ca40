//! Dataset and participant summary structures.

use super::NormalizedInteraction;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate figures for one participant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    /// Participant key
    pub participant: String,

    /// Number of interactions
    pub message_count: usize,

    /// Earliest `occurred_at`
    pub first_message_at: Option<NaiveDateTime>,

    /// Latest `occurred_at`
    pub last_message_at: Option<NaiveDateTime>,

    /// Sum of parseable input costs
    pub total_input_cost: f64,

    /// Sum of parseable output costs
    pub total_output_cost: f64,

    /// Sum of parseable total costs
    pub total_cost: f64,
}

impl ParticipantSummary {
    /// Create an empty summary for a participant.
    pub fn new(participant: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            ..Default::default()
        }
    }
}

/// Dataset-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Dataset key (e.g., "dataset_all")
    pub dataset: String,

    /// When the dataset was generated
    #[serde(with = "rfc3339_seconds")]
    pub generated_at: DateTime<Utc>,

    /// Identifier of the source workbook
    pub source_workbook: String,

    /// Number of interactions in the dataset
    pub record_count: usize,

    /// Latest message date across all interactions
    pub last_updated: Option<NaiveDate>,
}

/// A complete output dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset metadata
    pub meta: DatasetMetadata,

    /// Interactions in source order
    #[serde(default)]
    pub interactions: Vec<NormalizedInteraction>,

    /// Participant summaries sorted by participant key
    #[serde(default)]
    pub participants: Vec<ParticipantSummary>,
}

impl Dataset {
    /// Look up a participant summary by key.
    pub fn participant(&self, key: &str) -> Option<&ParticipantSummary> {
        self.participants.iter().find(|p| p.participant == key)
    }
}

/// `generated_at` is written as RFC 3339 with whole seconds and an explicit
/// `+00:00` offset.
mod rfc3339_seconds {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_serialization() {
        let meta = DatasetMetadata {
            dataset: "dataset_all".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap(),
            source_workbook: "export.xlsx".to_string(),
            record_count: 2,
            last_updated: NaiveDate::from_ymd_opt(2024, 3, 1),
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["generated_at"], "2024-03-05T08:30:00+00:00");
        assert_eq!(json["last_updated"], "2024-03-01");
        assert_eq!(json["record_count"], 2);

        let parsed: DatasetMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn test_absent_values_serialize_as_null() {
        let interaction = NormalizedInteraction {
            message_id: "m1".to_string(),
            participant: "p1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&interaction).unwrap();
        assert!(json["occurred_at"].is_null());
        assert!(json["subcategory"].is_null());
        assert!(json["total_cost"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 18);

        let summary = ParticipantSummary::new("p1");
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["first_message_at"].is_null());
        assert_eq!(json["total_cost"], 0.0);
    }
}

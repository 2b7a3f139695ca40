//! Header normalization and the column lookup built from it.

use std::collections::HashMap;

/// Header spellings that map onto a different canonical key.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("stud_week", "study_week"),
    ("participantid", "participant_name"),
    ("participant", "participant_name"),
];

/// Columns the header row must declare.
pub const REQUIRED_COLUMNS: [Column; 4] = [
    Column::MessageId,
    Column::ParticipantName,
    Column::MessageDate,
    Column::MessageTime,
];

/// Canonical source columns consumed by the record parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    MessageId,
    ParticipantName,
    MessageDate,
    MessageTime,
    Day,
    Category,
    OtherLabel,
    CategoryJustification,
    Satisfied,
    SatisfactionJustification,
    RegistrationDate,
    StudyWeek,
    ResponseLatency,
    EmergencyResponse,
    InputCost,
    OutputCost,
    TotalCost,
}

impl Column {
    /// Every known column, in output field order.
    pub const ALL: [Column; 17] = [
        Column::MessageId,
        Column::ParticipantName,
        Column::MessageDate,
        Column::MessageTime,
        Column::Day,
        Column::Category,
        Column::OtherLabel,
        Column::CategoryJustification,
        Column::Satisfied,
        Column::SatisfactionJustification,
        Column::RegistrationDate,
        Column::StudyWeek,
        Column::ResponseLatency,
        Column::EmergencyResponse,
        Column::InputCost,
        Column::OutputCost,
        Column::TotalCost,
    ];

    /// Canonical key as produced by [`normalize_column_name`].
    pub fn key(self) -> &'static str {
        match self {
            Column::MessageId => "message_id",
            Column::ParticipantName => "participant_name",
            Column::MessageDate => "message_date",
            Column::MessageTime => "message_time",
            Column::Day => "day",
            Column::Category => "category",
            Column::OtherLabel => "other_label",
            Column::CategoryJustification => "category_justification",
            Column::Satisfied => "satisfied",
            Column::SatisfactionJustification => "satisfaction_justification",
            Column::RegistrationDate => "registration_date",
            Column::StudyWeek => "study_week",
            Column::ResponseLatency => "response_latency",
            Column::EmergencyResponse => "emergency_response",
            Column::InputCost => "input_cost",
            Column::OutputCost => "output_cost",
            Column::TotalCost => "total_cost",
        }
    }

    /// Whether the header must declare this column.
    pub fn is_required(self) -> bool {
        REQUIRED_COLUMNS.contains(&self)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalize header text to a canonical column key.
///
/// Lowercases, turns every run of non-alphanumeric characters into a single
/// underscore, drops leading/trailing underscores, then applies
/// [`COLUMN_ALIASES`]. Canonical keys normalize to themselves.
pub fn normalize_column_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect();
    let collapsed = replaced
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == collapsed)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(collapsed)
}

/// Canonical column key -> column index, built from the header row.
///
/// Blank headers register nothing and the first column to claim a key keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    indices: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Build the schema from raw header cells.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut indices = HashMap::new();
        for (idx, cell) in header.iter().enumerate() {
            let key = normalize_column_name(cell.as_ref());
            if key.is_empty() {
                continue;
            }
            indices.entry(key).or_insert(idx);
        }
        Self { indices }
    }

    /// Column index for a canonical key.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.indices.get(key).copied()
    }

    /// Column index for a known column.
    pub fn column(&self, column: Column) -> Option<usize> {
        self.index_of(column.key())
    }

    /// Canonical names of required columns the header lacks, sorted.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| self.column(**c).is_none())
            .map(|c| c.key().to_string())
            .collect();
        missing.sort();
        missing
    }

    /// Registered canonical keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.indices.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no key was registered.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Message ID"), "message_id");
        assert_eq!(normalize_column_name("  Input Cost ($) "), "input_cost");
        assert_eq!(normalize_column_name("Category--Justification"), "category_justification");
        assert_eq!(normalize_column_name("__day__"), "day");
        assert_eq!(normalize_column_name("   "), "");
        assert_eq!(normalize_column_name("Étape 2"), "étape_2");
    }

    #[test]
    fn test_aliases() {
        assert_eq!(normalize_column_name("Stud_Week"), "study_week");
        assert_eq!(normalize_column_name("stud week"), "study_week");
        assert_eq!(normalize_column_name("ParticipantID"), "participant_name");
        assert_eq!(normalize_column_name("Participant"), "participant_name");
        assert_eq!(normalize_column_name("Participant ID"), "participant_id");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for column in Column::ALL {
            assert_eq!(normalize_column_name(column.key()), column.key());
        }
        for raw in ["Stud Week", "Total-Cost", "participantid"] {
            let once = normalize_column_name(raw);
            assert_eq!(normalize_column_name(&once), once);
        }
    }

    #[test]
    fn test_first_duplicate_wins() {
        let schema = ColumnSchema::from_header(&["Category", "", "category ", "CATEGORY"]);
        assert_eq!(schema.index_of("category"), Some(0));
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_blank_headers_are_skipped() {
        let schema = ColumnSchema::from_header(&["", "message_id", " ", "day"]);
        assert_eq!(schema.keys(), vec!["day", "message_id"]);
        assert_eq!(schema.column(Column::MessageId), Some(1));
        assert_eq!(schema.column(Column::Day), Some(3));
    }

    #[test]
    fn test_missing_required() {
        let schema = ColumnSchema::from_header(&["Participant", "Message ID", "Message Date"]);
        assert_eq!(schema.missing_required(), vec!["message_time"]);

        let schema = ColumnSchema::from_header::<&str>(&[]);
        assert_eq!(
            schema.missing_required(),
            vec!["message_date", "message_id", "message_time", "participant_name"]
        );
        assert!(Column::MessageTime.is_required());
        assert!(!Column::Category.is_required());
    }
}

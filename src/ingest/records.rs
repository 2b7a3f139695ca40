//! Worksheet rows to raw interaction records.

use super::coerce::parse_float;
use super::schema::{Column, ColumnSchema};
use crate::error::{Error, Result};
use crate::model::InteractionRecord;

/// Parse raw interaction records from dense rows.
///
/// The first row is the header. Every required column must resolve from it,
/// otherwise this fails before any data row is read. Rows whose cells are all
/// blank are dropped. An empty sheet yields no records.
pub fn parse_interactions<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Vec<InteractionRecord>> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let schema = ColumnSchema::from_header(header);
    let missing = schema.missing_required();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }
    tracing::debug!(columns = ?schema.keys(), "resolved worksheet columns");

    let records: Vec<InteractionRecord> = data
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.as_ref().trim().is_empty()))
        .map(|row| RowView::new(&schema, row).record())
        .collect();

    tracing::debug!(
        rows = data.len(),
        records = records.len(),
        "parsed interaction records"
    );
    Ok(records)
}

/// Access to one data row by canonical column.
struct RowView<'a, S> {
    schema: &'a ColumnSchema,
    row: &'a [S],
}

impl<'a, S: AsRef<str>> RowView<'a, S> {
    fn new(schema: &'a ColumnSchema, row: &'a [S]) -> Self {
        Self { schema, row }
    }

    /// Trimmed cell text; `""` when the column is unknown or past the row end.
    fn text(&self, column: Column) -> &'a str {
        self.schema
            .column(column)
            .and_then(|idx| self.row.get(idx))
            .map(|cell| cell.as_ref().trim())
            .unwrap_or("")
    }

    fn owned(&self, column: Column) -> String {
        self.text(column).to_string()
    }

    fn number(&self, column: Column) -> Option<f64> {
        parse_float(self.text(column))
    }

    fn record(&self) -> InteractionRecord {
        InteractionRecord {
            message_id: self.owned(Column::MessageId),
            participant: self.owned(Column::ParticipantName),
            message_date_serial: self.number(Column::MessageDate),
            message_time_fraction: self.number(Column::MessageTime),
            day_of_week: self.owned(Column::Day),
            category: self.owned(Column::Category),
            other_label: self.owned(Column::OtherLabel),
            category_justification: self.owned(Column::CategoryJustification),
            satisfied_raw: self.owned(Column::Satisfied),
            satisfaction_justification: self.owned(Column::SatisfactionJustification),
            registration_date_serial: self.number(Column::RegistrationDate),
            study_week_raw: self.owned(Column::StudyWeek),
            response_latency_raw: self.owned(Column::ResponseLatency),
            emergency_response_raw: self.owned(Column::EmergencyResponse),
            input_cost_raw: self.owned(Column::InputCost),
            output_cost_raw: self.owned(Column::OutputCost),
            total_cost_raw: self.owned(Column::TotalCost),
        }
    }
}

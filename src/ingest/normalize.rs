//! Raw records to typed interactions.

use super::coerce::{
    non_empty, normalize_subcategory, parse_bool, parse_float, parse_int, serial_to_date,
    serial_to_timestamp,
};
use crate::model::{InteractionRecord, NormalizedInteraction};

/// Convert one raw record into its typed form.
pub fn normalize_interaction(record: &InteractionRecord) -> NormalizedInteraction {
    NormalizedInteraction {
        message_id: record.message_id.clone(),
        participant: record.participant.clone(),
        message_date: serial_to_date(record.message_date_serial),
        message_time_fraction: record.message_time_fraction,
        occurred_at: serial_to_timestamp(record.message_date_serial, record.message_time_fraction),
        day_of_week: non_empty(&record.day_of_week),
        category: non_empty(&record.category),
        subcategory: normalize_subcategory(&record.other_label),
        category_justification: non_empty(&record.category_justification),
        satisfied: parse_bool(&record.satisfied_raw),
        satisfaction_justification: non_empty(&record.satisfaction_justification),
        registration_date: serial_to_date(record.registration_date_serial),
        study_week: parse_int(&record.study_week_raw),
        response_latency_seconds: parse_float(&record.response_latency_raw),
        emergency_response: parse_bool(&record.emergency_response_raw),
        input_cost: parse_float(&record.input_cost_raw),
        output_cost: parse_float(&record.output_cost_raw),
        total_cost: parse_float(&record.total_cost_raw),
    }
}

/// Normalize records, preserving their order.
pub fn normalize_all(records: &[InteractionRecord]) -> Vec<NormalizedInteraction> {
    records.iter().map(normalize_interaction).collect()
}

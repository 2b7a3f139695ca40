//! Participant summaries, dataset metadata and exclusion filtering.

use crate::model::{Dataset, DatasetMetadata, NormalizedInteraction, ParticipantSummary};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};

/// Fold interactions into one summary per participant, sorted by key.
///
/// Interactions with an empty participant are skipped here but stay in the
/// dataset. Absent costs add nothing to the sums.
pub fn build_participant_summaries(interactions: &[NormalizedInteraction]) -> Vec<ParticipantSummary> {
    let mut totals: BTreeMap<&str, ParticipantSummary> = BTreeMap::new();

    for entry in interactions {
        if entry.participant.is_empty() {
            continue;
        }

        let summary = totals
            .entry(entry.participant.as_str())
            .or_insert_with(|| ParticipantSummary::new(entry.participant.as_str()));

        summary.message_count += 1;
        if let Some(at) = entry.occurred_at {
            if summary.first_message_at.is_none_or(|first| at < first) {
                summary.first_message_at = Some(at);
            }
            if summary.last_message_at.is_none_or(|last| at > last) {
                summary.last_message_at = Some(at);
            }
        }

        summary.total_input_cost += entry.input_cost.unwrap_or(0.0);
        summary.total_output_cost += entry.output_cost.unwrap_or(0.0);
        summary.total_cost += entry.total_cost.unwrap_or(0.0);
    }

    totals.into_values().collect()
}

/// Latest message date across all interactions, if any has one.
pub fn compute_last_updated(interactions: &[NormalizedInteraction]) -> Option<NaiveDate> {
    interactions.iter().filter_map(|i| i.message_date).max()
}

/// Drop interactions whose participant matches an excluded key, ignoring case.
pub fn filter_interactions<S: AsRef<str>>(
    interactions: &[NormalizedInteraction],
    exclude_participants: &[S],
) -> Vec<NormalizedInteraction> {
    let excluded: HashSet<String> = exclude_participants
        .iter()
        .map(|p| p.as_ref().to_lowercase())
        .collect();
    if excluded.is_empty() {
        return interactions.to_vec();
    }

    interactions
        .iter()
        .filter(|i| !excluded.contains(&i.participant.to_lowercase()))
        .cloned()
        .collect()
}

/// Assemble a dataset with metadata and participant summaries computed from
/// `interactions` alone.
pub fn build_dataset(
    dataset_key: impl Into<String>,
    interactions: Vec<NormalizedInteraction>,
    source_workbook: impl Into<String>,
    generated_at: DateTime<Utc>,
) -> Dataset {
    let meta = DatasetMetadata {
        dataset: dataset_key.into(),
        generated_at,
        source_workbook: source_workbook.into(),
        record_count: interactions.len(),
        last_updated: compute_last_updated(&interactions),
    };
    let participants = build_participant_summaries(&interactions);

    Dataset {
        meta,
        interactions,
        participants,
    }
}

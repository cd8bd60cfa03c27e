//! Subject frequency report
//!
//! Counts how often each raw subject phrase occurs across a dataset,
//! excluding the subject the dataset was harvested for (it would trivially
//! top the list).

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::models::WorkRecord;

use super::{dataset, DatasetError};

#[derive(Debug, Serialize)]
struct FrequencyRow<'a> {
    #[serde(rename = "Subject")]
    subject: &'a str,

    #[serde(rename = "Count")]
    count: u64,
}

/// Count subject phrase occurrences across a dataset
///
/// Each record's subject string is split on commas; tokens are trimmed and
/// lower-cased before counting. `exclude` (compared lower-cased) is dropped.
/// The result is sorted by count descending, then subject ascending so equal
/// counts order deterministically.
pub fn subject_frequencies(records: &[WorkRecord], exclude: &str) -> Vec<(String, u64)> {
    let excluded = exclude.trim().to_lowercase();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for record in records {
        let Some(subjects) = record.subjects() else {
            continue;
        };

        for token in subjects.split(',') {
            let cleaned = token.trim().to_lowercase();
            if cleaned.is_empty() || cleaned == excluded {
                continue;
            }
            *counts.entry(cleaned).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<(String, u64)> = counts.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies
}

/// Write a frequency report as `Subject, Count` CSV
pub fn write_frequencies(path: &Path, frequencies: &[(String, u64)]) -> Result<(), DatasetError> {
    dataset::ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for (subject, count) in frequencies {
        writer.serialize(FrequencyRow { subject, count: *count })?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = frequencies.len(), "Wrote subject frequencies");
    Ok(())
}

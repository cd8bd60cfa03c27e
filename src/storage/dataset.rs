//! Work and search-result dataset files
//!
//! Header names are part of the external interface: other tools consume
//! these files by column name, so the serde renames on the record structs
//! are load-bearing.

use std::fs;
use std::path::Path;

use crate::models::{SearchRecord, WorkRecord};

use super::DatasetError;

/// Write harvested work records to a CSV file
///
/// Parent directories are created as needed; an existing file is replaced.
pub fn write_works(path: &Path, records: &[WorkRecord]) -> Result<(), DatasetError> {
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "Wrote work dataset");
    Ok(())
}

/// Read a work dataset back from CSV
///
/// Rows with malformed year fields are kept as-is; coercion to a numeric
/// year happens on access, so one bad cell never fails the whole read.
pub fn read_works(path: &Path) -> Result<Vec<WorkRecord>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize() {
        let record: WorkRecord = row?;
        records.push(record);
    }

    tracing::info!(path = %path.display(), rows = records.len(), "Read work dataset");
    Ok(records)
}

/// Write title-search results to a CSV file
pub fn write_search_records(path: &Path, records: &[SearchRecord]) -> Result<(), DatasetError> {
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "Wrote search dataset");
    Ok(())
}

pub(super) fn ensure_parent(path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

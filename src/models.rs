// Core data structures for the bibliotrend pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// Work record as persisted in the harvested dataset CSV
///
/// Field names map onto the dataset header row; `publish_year` is kept as the
/// raw string and coerced on demand so that non-numeric values survive a
/// round-trip instead of failing the whole read.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WorkRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Author(s)")]
    pub authors: String,

    #[serde(rename = "Publish Year", alias = "First Publish Year")]
    pub publish_year: String,

    #[serde(rename = "Subjects")]
    pub subjects: String,
}

impl WorkRecord {
    /// Coerce the raw publish-year field to an integer year
    ///
    /// Empty, non-numeric, or fractional values are missing, never an error.
    pub fn publish_year(&self) -> Option<i32> {
        self.publish_year.trim().parse::<i32>().ok()
    }

    /// Subject string, treating an empty field as missing
    pub fn subjects(&self) -> Option<&str> {
        let trimmed = self.subjects.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Search result record as persisted by the title-search command
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchRecord {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Author(s)")]
    pub authors: String,

    #[serde(rename = "Publish Year")]
    pub publish_year: String,

    #[serde(rename = "Publisher(s)")]
    pub publishers: String,

    #[serde(rename = "Language")]
    pub language: String,
}

/// One record-category pairing produced by classification fan-out
///
/// A record matching N categories yields N assignments; the year stays
/// optional until the aggregator filters on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    /// Coerced publish year, if the record had one
    pub year: Option<i32>,

    /// Matched category
    pub category: Category,
}

/// Inclusive year range over which aggregation and charting run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub start: i32,
    pub end: i32,
}

impl YearWindow {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for YearWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl std::str::FromStr for YearWindow {
    type Err = String;

    /// Parse `START:END` (also accepts `START..END`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .or_else(|| s.split_once(".."))
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;

        let start = start
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("invalid start year '{start}'"))?;
        let end = end
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("invalid end year '{end}'"))?;

        Ok(Self { start, end })
    }
}

/// Progress counters for a harvest run
#[derive(Debug, Clone, Serialize, Default)]
pub struct HarvestStats {
    pub pages_fetched: u32,
    pub works_written: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl HarvestStats {
    /// Create with the clock started
    pub fn begin() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Stop the clock
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_secs(&self) -> u64 {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => (end - start).num_seconds().max(0) as u64,
            _ => 0,
        }
    }

    /// Harvest rate (works per minute)
    pub fn works_per_minute(&self) -> f64 {
        let secs = self.duration_secs();
        if secs == 0 {
            0.0
        } else {
            (self.works_written as f64 / secs as f64) * 60.0
        }
    }
}

/// Counters accumulated while turning a dataset into assignments
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PipelineStats {
    /// Rows read from the dataset CSV
    pub records_read: u64,

    /// Rows whose publish year could not be coerced to an integer
    pub missing_year: u64,

    /// Rows outside the configured global year bounds
    pub out_of_bounds: u64,

    /// Rows that matched no category
    pub uncategorized: u64,

    /// Assignments produced by the fan-out
    pub assignments: u64,
}

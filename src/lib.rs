//! bibliotrend - Open Library bibliography trend pipeline
//!
//! Harvests work records from the Open Library API, persists them as CSV
//! datasets, classifies subject strings into fifteen fixed categories, and
//! renders categorized time-series charts over configurable year windows.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`harvest`] - Open Library API client and paginated harvesters
//! - [`storage`] - CSV dataset reading and writing
//! - [`classify`] - Subject-to-category keyword classification
//! - [`analytics`] - Year-window aggregation and LOWESS trend estimation
//! - [`charts`] - PNG chart rendering
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use bibliotrend::analytics::aggregate;
//! use bibliotrend::classify::expand_records;
//! use bibliotrend::storage::read_works;
//!
//! fn main() -> anyhow::Result<()> {
//!     let records = read_works(std::path::Path::new("data/works.csv"))?;
//!     let (assignments, _uncategorized) = expand_records(&records);
//!     let table = aggregate(&assignments, 1950, 2024)?;
//!     let percentages = table.to_percentages();
//!     println!("{} categories", percentages.columns().len());
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod charts;
pub mod classify;
pub mod config;
pub mod error;
pub mod harvest;
pub mod models;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{aggregate, trend, PercentageTable, TrendPoint, YearCategoryTable};
    pub use crate::classify::{classify, expand_records, Category};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::harvest::{OpenLibraryFetcher, SearchHarvester, SubjectHarvester};
    pub use crate::models::{CategoryAssignment, SearchRecord, WorkRecord, YearWindow};
    pub use crate::storage::{read_works, write_works};
}

// Direct re-exports for convenience
pub use classify::Category;
pub use models::{CategoryAssignment, SearchRecord, WorkRecord, YearWindow};

//! Analytics for categorized publication data
//!
//! Year-window aggregation into dense count/percentage tables and LOWESS
//! trend estimation over per-category percentage series.

pub mod aggregate;
pub mod trend;

pub use aggregate::{aggregate, AnalyticsError, PercentageTable, YearCategoryTable};
pub use trend::{lowess, trend, TrendPoint};

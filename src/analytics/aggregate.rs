//! Year-window aggregation of category assignments
//!
//! This module provides functionality for:
//! - Filtering assignments to an inclusive year window
//! - Counting assignments per (year, category) cell
//! - Dense reindexing so every year in the window is present
//! - Deriving per-year percentage views from count tables

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::classify::Category;
use crate::models::CategoryAssignment;

/// Errors that can occur during aggregation
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },
}

/// Result type for aggregation operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Dense (year x category) count table over an inclusive year window
///
/// Every integer year in `[start_year, end_year]` has a row; missing years
/// are zero-filled. The column set is the set of categories observed
/// anywhere in the input assignment sequence (before year filtering), in
/// canonical category order, so the same source data yields the same columns
/// for every window.
#[derive(Debug, Clone, Serialize)]
pub struct YearCategoryTable {
    start_year: i32,
    end_year: i32,
    columns: Vec<Category>,
    rows: BTreeMap<i32, Vec<u64>>,
}

impl YearCategoryTable {
    /// First year of the window (inclusive)
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last year of the window (inclusive)
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Categories present in the source data, in canonical order
    pub fn columns(&self) -> &[Category] {
        &self.columns
    }

    /// Years of the window in ascending order
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Count for one (year, category) cell
    ///
    /// Returns `None` for a year outside the window or a category outside
    /// the column set.
    pub fn count(&self, year: i32, category: Category) -> Option<u64> {
        let idx = self.column_index(category)?;
        self.rows.get(&year).map(|row| row[idx])
    }

    /// Counts for one year, in column order
    pub fn row(&self, year: i32) -> Option<&[u64]> {
        self.rows.get(&year).map(Vec::as_slice)
    }

    /// Total assignments in one year across all columns
    pub fn row_total(&self, year: i32) -> u64 {
        self.rows
            .get(&year)
            .map(|row| row.iter().sum())
            .unwrap_or(0)
    }

    /// (year, count) series for one category across the whole window
    pub fn column_series(&self, category: Category) -> Vec<(i32, u64)> {
        match self.column_index(category) {
            Some(idx) => self.rows.iter().map(|(&year, row)| (year, row[idx])).collect(),
            None => Vec::new(),
        }
    }

    /// Derive the percentage view of this table
    ///
    /// Each cell is divided by its row total and scaled to 100. A year with
    /// zero assignments yields NaN for every column in that row; fabricating
    /// zeros there would misrepresent an empty year as a uniform one.
    pub fn to_percentages(&self) -> PercentageTable {
        let rows = self
            .rows
            .iter()
            .map(|(&year, row)| {
                let total: u64 = row.iter().sum();
                let values = if total == 0 {
                    vec![f64::NAN; row.len()]
                } else {
                    row.iter()
                        .map(|&count| (count as f64 / total as f64) * 100.0)
                        .collect()
                };
                (year, values)
            })
            .collect();

        PercentageTable {
            start_year: self.start_year,
            end_year: self.end_year,
            columns: self.columns.clone(),
            rows,
        }
    }

    fn column_index(&self, category: Category) -> Option<usize> {
        self.columns.iter().position(|&c| c == category)
    }
}

/// Per-year category share table derived from a [`YearCategoryTable`]
///
/// Rows for years with at least one assignment sum to 100; rows for empty
/// years are NaN throughout.
#[derive(Debug, Clone, Serialize)]
pub struct PercentageTable {
    start_year: i32,
    end_year: i32,
    columns: Vec<Category>,
    rows: BTreeMap<i32, Vec<f64>>,
}

impl PercentageTable {
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn columns(&self) -> &[Category] {
        &self.columns
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.rows.keys().copied()
    }

    /// Percentages for one year, in column order
    pub fn row(&self, year: i32) -> Option<&[f64]> {
        self.rows.get(&year).map(Vec::as_slice)
    }

    /// Percentage for one (year, category) cell
    pub fn value(&self, year: i32, category: Category) -> Option<f64> {
        let idx = self.columns.iter().position(|&c| c == category)?;
        self.rows.get(&year).map(|row| row[idx])
    }

    /// (year, percentage) series for one category across the whole window
    ///
    /// NaN entries mark years with no assignments at all; callers decide
    /// whether to render them as gaps or drop them.
    pub fn column_series(&self, category: Category) -> Vec<(i32, f64)> {
        match self.columns.iter().position(|&c| c == category) {
            Some(idx) => self.rows.iter().map(|(&year, row)| (year, row[idx])).collect(),
            None => Vec::new(),
        }
    }
}

/// Aggregate assignments into a dense count table over a year window
///
/// Assignments with a missing year, or a year outside the inclusive
/// `[start_year, end_year]` range, are dropped. Column derivation and dense
/// year filling follow the table invariants documented on
/// [`YearCategoryTable`].
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidRange`] when `start_year > end_year`;
/// a reversed window is a caller bug, not an empty result.
pub fn aggregate(
    assignments: &[CategoryAssignment],
    start_year: i32,
    end_year: i32,
) -> AnalyticsResult<YearCategoryTable> {
    if start_year > end_year {
        return Err(AnalyticsError::InvalidRange {
            start: start_year,
            end: end_year,
        });
    }

    // Columns come from the full input, not the windowed subset
    let columns: Vec<Category> = Category::all()
        .into_iter()
        .filter(|&c| assignments.iter().any(|a| a.category == c))
        .collect();

    let mut rows: BTreeMap<i32, Vec<u64>> = (start_year..=end_year)
        .map(|year| (year, vec![0u64; columns.len()]))
        .collect();

    for assignment in assignments {
        let Some(year) = assignment.year else {
            continue;
        };
        if year < start_year || year > end_year {
            continue;
        }

        let idx = columns
            .iter()
            .position(|&c| c == assignment.category)
            .expect("column set covers every input category");
        if let Some(row) = rows.get_mut(&year) {
            row[idx] += 1;
        }
    }

    Ok(YearCategoryTable {
        start_year,
        end_year,
        columns,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;

    fn assignment(year: i32, category: Category) -> CategoryAssignment {
        CategoryAssignment {
            year: Some(year),
            category,
        }
    }

    #[test]
    fn test_window_is_dense() {
        let table = aggregate(
            &[assignment(2000, Category::DatabasesAndManagement)],
            1998,
            2002,
        )
        .unwrap();

        let years: Vec<i32> = table.years().collect();
        assert_eq!(years, vec![1998, 1999, 2000, 2001, 2002]);
        assert_eq!(table.columns(), &[Category::DatabasesAndManagement]);
        assert_eq!(table.count(2000, Category::DatabasesAndManagement), Some(1));
        assert_eq!(table.count(1998, Category::DatabasesAndManagement), Some(0));
        assert_eq!(table.count(2002, Category::DatabasesAndManagement), Some(0));
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let result = aggregate(&[], 2002, 1998);
        assert!(matches!(
            result,
            Err(AnalyticsError::InvalidRange { start: 2002, end: 1998 })
        ));
    }

    #[test]
    fn test_missing_year_is_dropped() {
        let assignments = vec![
            CategoryAssignment {
                year: None,
                category: Category::RoboticsAndAutomation,
            },
            assignment(2000, Category::RoboticsAndAutomation),
        ];

        let table = aggregate(&assignments, 1999, 2001).unwrap();
        assert_eq!(table.row_total(2000), 1);
        assert_eq!(table.row_total(1999), 0);
    }

    #[test]
    fn test_columns_derived_from_full_input() {
        // The 1990 robotics assignment is outside the window but still
        // contributes its column, keeping columns stable across windows.
        let assignments = vec![
            assignment(1990, Category::RoboticsAndAutomation),
            assignment(2000, Category::DatabasesAndManagement),
        ];

        let table = aggregate(&assignments, 1998, 2002).unwrap();
        assert_eq!(
            table.columns(),
            &[
                Category::DatabasesAndManagement,
                Category::RoboticsAndAutomation,
            ]
        );
        assert_eq!(table.count(2000, Category::RoboticsAndAutomation), Some(0));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let assignments = vec![
            assignment(2000, Category::DatabasesAndManagement),
            assignment(2000, Category::DatabasesAndManagement),
            assignment(2000, Category::RoboticsAndAutomation),
            assignment(2001, Category::RoboticsAndAutomation),
        ];

        let pct = aggregate(&assignments, 2000, 2001).unwrap().to_percentages();

        for year in [2000, 2001] {
            let sum: f64 = pct.row(year).unwrap().iter().sum();
            assert!(
                (sum - 100.0).abs() < 1e-6 * 100.0,
                "row {year} sums to {sum}"
            );
        }

        let db_share = pct.value(2000, Category::DatabasesAndManagement).unwrap();
        assert!((db_share - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_year_row_is_nan() {
        let assignments = vec![assignment(2000, Category::DatabasesAndManagement)];
        let pct = aggregate(&assignments, 1999, 2000).unwrap().to_percentages();

        let empty_row = pct.row(1999).unwrap();
        assert!(empty_row.iter().all(|v| v.is_nan()));

        let full_row = pct.row(2000).unwrap();
        assert!(full_row.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_column_series_spans_window() {
        let assignments = vec![
            assignment(2000, Category::SecurityAndPrivacy),
            assignment(2002, Category::SecurityAndPrivacy),
        ];

        let table = aggregate(&assignments, 2000, 2002).unwrap();
        assert_eq!(
            table.column_series(Category::SecurityAndPrivacy),
            vec![(2000, 1), (2001, 0), (2002, 1)]
        );

        // Unknown column yields an empty series, not a panic
        assert!(table.column_series(Category::PhilosophyAndEthics).is_empty());
    }
}

//! Chart rendering sink
//!
//! Renders aggregated tables to PNG files: stacked area charts for counts
//! and percentages, per-category percentage lines, and trend charts with a
//! LOWESS overlay. Output paths follow a fixed convention so downstream
//! consumers can address charts without listing directories:
//!
//! `{base}/{chart_kind}/{category_or_"all_categories"}/{chart_kind}_{slug}_{start}_{end}.png`
//!
//! with the two area charts sitting directly under their kind directory.

pub mod area;
pub mod line;
pub mod trend;

pub use area::{count_area_chart, percentage_area_chart};
pub use line::{all_categories_line_chart, percentage_line_chart};
pub use trend::trend_line_chart;

use std::path::{Path, PathBuf};

use plotters::style::RGBColor;
use thiserror::Error;

use crate::classify::Category;
use crate::models::YearWindow;

/// Canvas size for every chart
pub(crate) const CHART_SIZE: (u32, u32) = (1600, 800);

/// Caption and axis-label fonts
pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 32);
pub(crate) const LABEL_FONT: (&str, u32) = ("sans-serif", 18);

/// Errors that can occur while rendering charts
#[derive(Error, Debug)]
pub enum ChartError {
    /// I/O error creating output directories
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend drawing failure
    #[error("Render error: {0}")]
    Render(String),
}

/// Collapse any backend error into a renderable message
pub(crate) fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Fill/stroke color for a category
pub(crate) fn category_color(category: Category) -> RGBColor {
    let (r, g, b) = category.style().rgb;
    RGBColor(r, g, b)
}

/// Split a series into contiguous runs of finite values
///
/// NaN entries (years with no assignments) become gaps between runs; they
/// are never rendered as zeros.
pub(crate) fn finite_runs(series: &[(i32, f64)]) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for &(year, value) in series {
        if value.is_finite() {
            current.push((year, value));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

/// X-axis range for a window, padded so a single-year window still renders
pub(crate) fn x_range(window: YearWindow) -> std::ops::Range<f64> {
    let start = window.start as f64;
    let end = (window.end as f64).max(start + 1.0);
    start..end
}

/// `{base}/count_area_chart/count_area_chart_{start}_{end}.png`
pub fn count_area_path(base: &Path, window: YearWindow) -> PathBuf {
    kind_path(base, "count_area_chart", None, window)
}

/// `{base}/percentage_area_chart/percentage_area_chart_{start}_{end}.png`
pub fn percentage_area_path(base: &Path, window: YearWindow) -> PathBuf {
    kind_path(base, "percentage_area_chart", None, window)
}

/// `{base}/percentage_line_chart/{slug}/percentage_line_chart_{slug}_{start}_{end}.png`
pub fn line_chart_path(base: &Path, category: Category, window: YearWindow) -> PathBuf {
    kind_path(base, "percentage_line_chart", Some(&category.slug()), window)
}

/// `{base}/percentage_line_chart/all_categories/..._all_categories_{start}_{end}.png`
pub fn all_categories_path(base: &Path, window: YearWindow) -> PathBuf {
    kind_path(base, "percentage_line_chart", Some("all_categories"), window)
}

/// `{base}/trends/{slug}/trend_line_chart_{slug}_{start}_{end}.png`
pub fn trend_chart_path(base: &Path, category: Category, window: YearWindow) -> PathBuf {
    let slug = category.slug();
    base.join("trends").join(&slug).join(format!(
        "trend_line_chart_{}_{}_{}.png",
        slug, window.start, window.end
    ))
}

fn kind_path(base: &Path, kind: &str, category: Option<&str>, window: YearWindow) -> PathBuf {
    let mut dir = base.join(kind);
    let slug = match category {
        Some(slug) => {
            dir = dir.join(slug);
            slug
        }
        None => kind,
    };
    let file = if category.is_some() {
        format!("{}_{}_{}_{}.png", kind, slug, window.start, window.end)
    } else {
        format!("{}_{}_{}.png", kind, window.start, window.end)
    };
    dir.join(file)
}

/// Create the parent directory of a chart file
pub(crate) fn ensure_parent(path: &Path) -> Result<(), ChartError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_runs_split_on_nan() {
        let series = vec![
            (2000, 1.0),
            (2001, f64::NAN),
            (2002, 2.0),
            (2003, 3.0),
            (2004, f64::NAN),
        ];

        let runs = finite_runs(&series);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(2000, 1.0)]);
        assert_eq!(runs[1], vec![(2002, 2.0), (2003, 3.0)]);
    }

    #[test]
    fn test_finite_runs_all_nan() {
        let series = vec![(2000, f64::NAN), (2001, f64::NAN)];
        assert!(finite_runs(&series).is_empty());
    }

    #[test]
    fn test_area_chart_paths() {
        let base = Path::new("charts");
        let window = YearWindow::new(1950, 1982);

        assert_eq!(
            count_area_path(base, window),
            Path::new("charts/count_area_chart/count_area_chart_1950_1982.png")
        );
        assert_eq!(
            percentage_area_path(base, window),
            Path::new("charts/percentage_area_chart/percentage_area_chart_1950_1982.png")
        );
    }

    #[test]
    fn test_category_chart_paths() {
        let base = Path::new("out");
        let window = YearWindow::new(1970, 2005);

        assert_eq!(
            line_chart_path(base, Category::RoboticsAndAutomation, window),
            Path::new(
                "out/percentage_line_chart/robotics_and_automation/percentage_line_chart_robotics_and_automation_1970_2005.png"
            )
        );
        assert_eq!(
            all_categories_path(base, window),
            Path::new(
                "out/percentage_line_chart/all_categories/percentage_line_chart_all_categories_1970_2005.png"
            )
        );
        assert_eq!(
            trend_chart_path(base, Category::SecurityAndPrivacy, window),
            Path::new(
                "out/trends/security_and_privacy/trend_line_chart_security_and_privacy_1970_2005.png"
            )
        );
    }

    #[test]
    fn test_x_range_pads_single_year_window() {
        let range = x_range(YearWindow::new(2000, 2000));
        assert_eq!(range, 2000.0..2001.0);
    }
}

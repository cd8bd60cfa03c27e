//! Stacked area charts for count and percentage tables

use std::path::Path;

use plotters::prelude::*;

use crate::analytics::{PercentageTable, YearCategoryTable};
use crate::models::YearWindow;

use super::{
    category_color, ensure_parent, render_error, x_range, ChartError, CAPTION_FONT, CHART_SIZE,
    LABEL_FONT,
};

/// Render the stacked count area chart for one window
pub fn count_area_chart(table: &YearCategoryTable, path: &Path) -> Result<(), ChartError> {
    ensure_parent(path)?;

    let window = YearWindow::new(table.start_year(), table.end_year());
    let years: Vec<i32> = table.years().collect();
    let columns = table.columns().to_vec();

    // Cumulative stack per column index
    let mut stack = vec![vec![0f64; years.len()]; columns.len()];
    let mut y_max = 1f64;
    for (i, &year) in years.iter().enumerate() {
        let row = table.row(year).unwrap_or(&[]);
        let mut acc = 0f64;
        for (k, &count) in row.iter().enumerate() {
            acc += count as f64;
            stack[k][i] = acc;
        }
        y_max = y_max.max(acc);
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Distribution of categories in published works ({}-{})",
                window.start, window.end
            ),
            CAPTION_FONT,
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(window), 0f64..y_max * 1.05)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of works published")
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_error)?;

    // Draw top of the stack first so lower layers paint over it
    for (k, &category) in columns.iter().enumerate().rev() {
        let color = category_color(category);
        let points: Vec<(f64, f64)> = years
            .iter()
            .enumerate()
            .map(|(i, &year)| (year as f64, stack[k][i]))
            .collect();

        chart
            .draw_series(
                AreaSeries::new(points, 0.0, color.mix(0.7)).border_style(color.stroke_width(1)),
            )
            .map_err(render_error)?
            .label(category.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    tracing::debug!(path = %path.display(), "Rendered count area chart");
    Ok(())
}

/// Render the stacked percentage area chart for one window
///
/// Years with no assignments are NaN rows; the stack breaks into gaps there
/// instead of collapsing to zero.
pub fn percentage_area_chart(pct: &PercentageTable, path: &Path) -> Result<(), ChartError> {
    ensure_parent(path)?;

    let window = YearWindow::new(pct.start_year(), pct.end_year());
    let years: Vec<i32> = pct.years().collect();
    let columns = pct.columns().to_vec();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Percentage distribution of categories in published works ({}-{})",
                window.start, window.end
            ),
            CAPTION_FONT,
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(window), 0f64..105f64)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Percentage of works published")
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_error)?;

    // Contiguous year runs where the row is defined
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for (i, &year) in years.iter().enumerate() {
        let defined = pct
            .row(year)
            .map(|row| row.iter().all(|v| v.is_finite()))
            .unwrap_or(false);
        if defined {
            current.push(i);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    for (k, &category) in columns.iter().enumerate().rev() {
        let color = category_color(category);
        let mut labeled = false;

        for run in &runs {
            let points: Vec<(f64, f64)> = run
                .iter()
                .map(|&i| {
                    let year = years[i];
                    let row = pct.row(year).unwrap_or(&[]);
                    let cumulative: f64 = row[..=k].iter().sum();
                    (year as f64, cumulative)
                })
                .collect();

            let series = chart
                .draw_series(
                    AreaSeries::new(points, 0.0, color.mix(0.7))
                        .border_style(color.stroke_width(1)),
                )
                .map_err(render_error)?;

            if !labeled {
                series.label(category.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
                labeled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    tracing::debug!(path = %path.display(), "Rendered percentage area chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::classify::Category;
    use crate::models::CategoryAssignment;

    fn assignment(year: i32, category: Category) -> CategoryAssignment {
        CategoryAssignment {
            year: Some(year),
            category,
        }
    }

    #[test]
    fn test_count_area_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("count.png");

        let table = aggregate(
            &[
                assignment(2000, Category::RoboticsAndAutomation),
                assignment(2001, Category::DatabasesAndManagement),
            ],
            1999,
            2002,
        )
        .unwrap();

        count_area_chart(&table, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_percentage_area_chart_handles_nan_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pct.png");

        // 2001 has no assignments at all, so its row is NaN
        let pct = aggregate(
            &[
                assignment(2000, Category::RoboticsAndAutomation),
                assignment(2002, Category::RoboticsAndAutomation),
            ],
            2000,
            2002,
        )
        .unwrap()
        .to_percentages();

        percentage_area_chart(&pct, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_chart_with_no_columns_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let table = aggregate(&[], 2000, 2001).unwrap();
        count_area_chart(&table, &path).unwrap();
        assert!(path.exists());
    }
}

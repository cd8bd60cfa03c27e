//! Trend charts: percentage line with a LOWESS overlay

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::analytics::{trend, PercentageTable};
use crate::classify::Category;
use crate::models::YearWindow;

use super::line::finite_max;
use super::{
    category_color, ensure_parent, finite_runs, render_error, x_range, ChartError, CAPTION_FONT,
    CHART_SIZE, LABEL_FONT,
};

/// Render one category's percentage line with its smoothed trend curve
///
/// The trend starts at the category's first non-zero year; a category that
/// never appears in the window gets the raw line only, with no fabricated
/// flat trend.
pub fn trend_line_chart(
    pct: &PercentageTable,
    category: Category,
    path: &Path,
) -> Result<(), ChartError> {
    ensure_parent(path)?;

    let window = YearWindow::new(pct.start_year(), pct.end_year());
    let series = pct.column_series(category);
    let curve = trend(&series);
    let y_max = finite_max(
        series
            .iter()
            .map(|&(_, v)| v)
            .chain(curve.iter().map(|p| p.value)),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Percentage of works published in {} with trend ({}-{})",
                category, window.start, window.end
            ),
            CAPTION_FONT,
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(window), 0f64..y_max)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Percentage of works published")
        .label_style(LABEL_FONT)
        .draw()
        .map_err(render_error)?;

    let color = category_color(category);
    for run in finite_runs(&series) {
        chart
            .draw_series(LineSeries::new(
                run.into_iter().map(|(year, value)| (year as f64, value)),
                color.stroke_width(2),
            ))
            .map_err(render_error)?;
    }

    if !curve.is_empty() {
        chart
            .draw_series(DashedLineSeries::new(
                curve.iter().map(|p| (p.year as f64, p.value)),
                8,
                4,
                RED.stroke_width(1),
            ))
            .map_err(render_error)?;
    }

    root.present().map_err(render_error)?;
    tracing::debug!(path = %path.display(), category = %category, "Rendered trend chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate;
    use crate::models::CategoryAssignment;

    fn assignment(year: i32, category: Category) -> CategoryAssignment {
        CategoryAssignment {
            year: Some(year),
            category,
        }
    }

    #[test]
    fn test_trend_chart_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.png");

        let pct = aggregate(
            &(2000..2010)
                .map(|year| assignment(year, Category::NeuralNetworks))
                .collect::<Vec<_>>(),
            2000,
            2009,
        )
        .unwrap()
        .to_percentages();

        trend_line_chart(&pct, Category::NeuralNetworks, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_trend_chart_with_absent_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");

        let pct = aggregate(
            &[assignment(2000, Category::NeuralNetworks)],
            2000,
            2002,
        )
        .unwrap()
        .to_percentages();

        // No Robotics column at all; the chart still renders without a curve
        trend_line_chart(&pct, Category::RoboticsAndAutomation, &path).unwrap();
        assert!(path.exists());
    }
}

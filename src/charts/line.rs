//! Percentage line charts, per category and combined

use std::path::Path;

use plotters::prelude::*;

use crate::analytics::PercentageTable;
use crate::classify::Category;
use crate::models::YearWindow;

use super::{
    category_color, ensure_parent, finite_runs, render_error, x_range, ChartError, CAPTION_FONT,
    CHART_SIZE, LABEL_FONT,
};

/// Render one category's percentage line for one window
pub fn percentage_line_chart(
    pct: &PercentageTable,
    category: Category,
    path: &Path,
) -> Result<(), ChartError> {
    ensure_parent(path)?;

    let window = YearWindow::new(pct.start_year(), pct.end_year());
    let series = pct.column_series(category);
    let y_max = finite_max(series.iter().map(|&(_, v)| v));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Percentage of works published in {} ({}-{})",
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

    root.present().map_err(render_error)?;
    tracing::debug!(path = %path.display(), category = %category, "Rendered line chart");
    Ok(())
}

/// Render every category's percentage line on one chart
pub fn all_categories_line_chart(pct: &PercentageTable, path: &Path) -> Result<(), ChartError> {
    ensure_parent(path)?;

    let window = YearWindow::new(pct.start_year(), pct.end_year());
    let y_max = finite_max(
        pct.columns()
            .iter()
            .flat_map(|&c| pct.column_series(c))
            .map(|(_, v)| v),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Percentage of works published in all categories ({}-{})",
                window.start, window.end
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

    for &category in pct.columns() {
        let color = category_color(category);
        let mut labeled = false;

        for run in finite_runs(&pct.column_series(category)) {
            let series = chart
                .draw_series(LineSeries::new(
                    run.into_iter().map(|(year, value)| (year as f64, value)),
                    color.stroke_width(2),
                ))
                .map_err(render_error)?;

            if !labeled {
                series.label(category.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
                labeled = true;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    tracing::debug!(path = %path.display(), "Rendered all-categories line chart");
    Ok(())
}

/// Largest finite value, padded, with a floor so flat series still render
pub(super) fn finite_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0f64, f64::max);
    (max * 1.05).max(1.0)
}

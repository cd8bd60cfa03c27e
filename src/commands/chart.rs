use anyhow::{ensure, Context, Result};
use std::path::{Path, PathBuf};

use bibliotrend::analytics::{aggregate, PercentageTable, YearCategoryTable};
use bibliotrend::charts;
use bibliotrend::classify::expand_records;
use bibliotrend::config::Config;
use bibliotrend::models::{CategoryAssignment, PipelineStats, WorkRecord, YearWindow};
use bibliotrend::storage::read_works;

/// Per-window chart outcome counters
#[derive(Default)]
struct RenderTally {
    written: u32,
    failed: u32,
}

pub fn chart(
    config: &Config,
    input: PathBuf,
    output_dir: Option<PathBuf>,
    windows: Vec<YearWindow>,
) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(|| config.chart.output_dir.clone());
    let windows = if windows.is_empty() {
        config.chart.windows.clone()
    } else {
        windows
    };

    // Reversed windows fail before any chart is produced
    for window in &windows {
        ensure!(window.start <= window.end, "invalid year window {window}");
    }

    println!("Starting chart pipeline");
    println!("=======================");
    println!("  Input:   {}", input.display());
    println!("  Charts:  {}", output_dir.display());
    println!("  Windows: {}", windows.len());

    let records = read_works(&input).context("Failed to read dataset")?;
    let (assignments, stats) = prepare_assignments(&records, config);

    tracing::info!(
        records = stats.records_read,
        missing_year = stats.missing_year,
        out_of_bounds = stats.out_of_bounds,
        uncategorized = stats.uncategorized,
        assignments = stats.assignments,
        "Prepared category assignments"
    );

    let mut tally = RenderTally::default();
    for &window in &windows {
        println!("\nProcessing window {window}");

        let table = aggregate(&assignments, window.start, window.end)
            .with_context(|| format!("Aggregation failed for window {window}"))?;
        let pct = table.to_percentages();

        render_window(&table, &pct, &output_dir, window, &mut tally);
    }

    println!("\nPipeline Summary");
    println!("================");
    println!("Records read:    {}", stats.records_read);
    println!("Missing year:    {}", stats.missing_year);
    println!("Out of bounds:   {}", stats.out_of_bounds);
    println!("Uncategorized:   {}", stats.uncategorized);
    println!("Assignments:     {}", stats.assignments);
    println!("Charts written:  {}", tally.written);
    println!("Charts failed:   {}", tally.failed);

    Ok(())
}

/// Coerce years, apply the global bounds, classify, and fan out
fn prepare_assignments(
    records: &[WorkRecord],
    config: &Config,
) -> (Vec<CategoryAssignment>, PipelineStats) {
    let mut stats = PipelineStats {
        records_read: records.len() as u64,
        ..Default::default()
    };

    let mut kept = Vec::new();
    for record in records {
        match record.publish_year() {
            None => stats.missing_year += 1,
            Some(year) if year < config.chart.min_year || year > config.chart.max_year => {
                stats.out_of_bounds += 1;
            }
            Some(_) => kept.push(record.clone()),
        }
    }

    let (assignments, uncategorized) = expand_records(&kept);
    stats.uncategorized = uncategorized;
    stats.assignments = assignments.len() as u64;

    (assignments, stats)
}

/// Render every chart kind for one window
///
/// A failure on one chart is logged and counted; the rest of the window and
/// the remaining categories still render.
fn render_window(
    table: &YearCategoryTable,
    pct: &PercentageTable,
    base: &Path,
    window: YearWindow,
    tally: &mut RenderTally,
) {
    record_outcome(
        charts::count_area_chart(table, &charts::count_area_path(base, window)),
        "count area chart",
        tally,
    );

    record_outcome(
        charts::percentage_area_chart(pct, &charts::percentage_area_path(base, window)),
        "percentage area chart",
        tally,
    );

    for &category in pct.columns() {
        record_outcome(
            charts::percentage_line_chart(pct, category, &charts::line_chart_path(base, category, window)),
            category.as_str(),
            tally,
        );

        record_outcome(
            charts::trend_line_chart(pct, category, &charts::trend_chart_path(base, category, window)),
            category.as_str(),
            tally,
        );
    }

    record_outcome(
        charts::all_categories_line_chart(pct, &charts::all_categories_path(base, window)),
        "all-categories line chart",
        tally,
    );
}

fn record_outcome(
    result: std::result::Result<(), bibliotrend::charts::ChartError>,
    what: &str,
    tally: &mut RenderTally,
) {
    match result {
        Ok(()) => tally.written += 1,
        Err(e) => {
            tracing::warn!(chart = what, error = %e, "Failed to render chart");
            tally.failed += 1;
        }
    }
}

//! End-to-end pipeline tests: dataset CSV through classification,
//! aggregation, percentages, and chart files on disk.

use bibliotrend::analytics::aggregate;
use bibliotrend::charts;
use bibliotrend::classify::{expand_records, Category};
use bibliotrend::models::YearWindow;
use bibliotrend::storage::{read_works, subject_frequencies, write_works};
use bibliotrend::WorkRecord;

fn record(title: &str, year: &str, subjects: &str) -> WorkRecord {
    WorkRecord {
        title: title.into(),
        authors: "Test Author".into(),
        publish_year: year.into(),
        subjects: subjects.into(),
    }
}

#[test]
fn test_dataset_to_percentage_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("works.csv");

    let records = vec![
        record("Robot Minds", "2000", "Robotics, Control theory"),
        record("Safe Queries", "2000", "Database security"),
        record("Bad Year", "n/a", "Robotics"),
        record("Unmatched", "2001", "Cooking"),
        record("Late Robots", "2002", "Industrial robots"),
    ];
    write_works(&path, &records).unwrap();

    let restored = read_works(&path).unwrap();
    assert_eq!(restored.len(), 5);

    let (assignments, uncategorized) = expand_records(&restored);
    assert_eq!(uncategorized, 1);

    // "Database security" fans out into two categories; "Bad Year" still
    // yields an assignment, with its missing year left for the aggregator
    assert_eq!(assignments.len(), 5);

    let table = aggregate(&assignments, 1999, 2002).unwrap();
    let years: Vec<i32> = table.years().collect();
    assert_eq!(years, vec![1999, 2000, 2001, 2002]);
    assert_eq!(
        table.columns(),
        &[
            Category::DatabasesAndManagement,
            Category::RoboticsAndAutomation,
            Category::SecurityAndPrivacy,
        ]
    );

    // "Bad Year" has no parseable year and lands nowhere
    assert_eq!(table.row_total(1999), 0);
    assert_eq!(table.row_total(2000), 3);
    assert_eq!(table.row_total(2001), 0);
    assert_eq!(table.row_total(2002), 1);

    let pct = table.to_percentages();
    let row_2000: f64 = pct.row(2000).unwrap().iter().sum();
    assert!((row_2000 - 100.0).abs() < 1e-6);
    assert!(pct.row(2001).unwrap().iter().all(|v| v.is_nan()));
    assert_eq!(pct.value(2002, Category::RoboticsAndAutomation), Some(100.0));
}

#[test]
fn test_chart_files_land_at_conventional_paths() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    let window = YearWindow::new(1998, 2002);

    let records = vec![
        record("A", "1999", "Robotics"),
        record("B", "2000", "Robotics"),
        record("C", "2000", "Database systems"),
        record("D", "2002", "Robotics"),
    ];
    let (assignments, _) = expand_records(&records);
    let table = aggregate(&assignments, window.start, window.end).unwrap();
    let pct = table.to_percentages();

    charts::count_area_chart(&table, &charts::count_area_path(base, window)).unwrap();
    charts::percentage_area_chart(&pct, &charts::percentage_area_path(base, window)).unwrap();
    charts::all_categories_line_chart(&pct, &charts::all_categories_path(base, window)).unwrap();
    for &category in pct.columns() {
        charts::percentage_line_chart(&pct, category, &charts::line_chart_path(base, category, window))
            .unwrap();
        charts::trend_line_chart(&pct, category, &charts::trend_chart_path(base, category, window))
            .unwrap();
    }

    let expected = [
        "count_area_chart/count_area_chart_1998_2002.png",
        "percentage_area_chart/percentage_area_chart_1998_2002.png",
        "percentage_line_chart/all_categories/percentage_line_chart_all_categories_1998_2002.png",
        "percentage_line_chart/robotics_and_automation/percentage_line_chart_robotics_and_automation_1998_2002.png",
        "percentage_line_chart/databases_and_management/percentage_line_chart_databases_and_management_1998_2002.png",
        "trends/robotics_and_automation/trend_line_chart_robotics_and_automation_1998_2002.png",
        "trends/databases_and_management/trend_line_chart_databases_and_management_1998_2002.png",
    ];
    for relative in expected {
        let path = base.join(relative);
        assert!(path.exists(), "missing chart file {relative}");
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_subject_frequency_report() {
    let records = vec![
        record("A", "2000", "Artificial intelligence, Robotics, Ethics"),
        record("B", "2001", "artificial intelligence, robotics"),
        record("C", "2002", ""),
    ];

    let frequencies = subject_frequencies(&records, "Artificial Intelligence");
    assert_eq!(
        frequencies,
        vec![("robotics".to_string(), 2), ("ethics".to_string(), 1)]
    );
}

#[test]
fn test_windows_are_independent() {
    let records = vec![
        record("A", "1960", "Robotics"),
        record("B", "1990", "Robotics"),
        record("C", "2020", "Database"),
    ];
    let (assignments, _) = expand_records(&records);

    // Columns stay stable across windows because they derive from the full
    // assignment set, not the windowed subset
    let early = aggregate(&assignments, 1950, 1982).unwrap();
    let late = aggregate(&assignments, 2012, 2024).unwrap();
    assert_eq!(early.columns(), late.columns());

    assert_eq!(early.row_total(1960), 1);
    assert_eq!(early.count(1960, Category::DatabasesAndManagement), Some(0));
    assert_eq!(late.row_total(2020), 1);
}

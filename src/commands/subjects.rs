use anyhow::{Context, Result};
use std::path::PathBuf;

use bibliotrend::storage::{read_works, subject_frequencies, write_frequencies};

pub fn subjects(input: PathBuf, output: PathBuf, exclude: String) -> Result<()> {
    println!("Counting subject frequencies");
    println!("============================");
    println!("  Input:    {}", input.display());
    println!("  Excluded: {exclude}");

    let records = read_works(&input).context("Failed to read dataset")?;
    let frequencies = subject_frequencies(&records, &exclude);
    write_frequencies(&output, &frequencies).context("Failed to write report")?;

    println!("\nSubject Report");
    println!("==============");
    println!("Records read:      {}", records.len());
    println!("Distinct subjects: {}", frequencies.len());
    for (subject, count) in frequencies.iter().take(10) {
        println!("  {count:>6}  {subject}");
    }
    println!("Report: {}", output.display());

    Ok(())
}

use anyhow::{Context, Result};
use std::path::PathBuf;

use bibliotrend::config::Config;
use bibliotrend::harvest::{OpenLibraryFetcher, SubjectHarvester};
use bibliotrend::storage::write_works;

pub async fn harvest(config: &Config, subject: String, output: PathBuf) -> Result<()> {
    println!("Starting subject harvest");
    println!("========================");
    println!("  Subject: {subject}");
    println!("  Output:  {}", output.display());

    let fetcher = OpenLibraryFetcher::with_base_url(
        &config.harvest.base_url,
        config.request_timeout(),
        &config.harvest.user_agent,
    )
    .context("Failed to create fetcher")?;

    let harvester = SubjectHarvester::new(fetcher, config.harvest.page_limit);
    let (records, stats) = harvester
        .run(&subject)
        .await
        .context("Subject harvest failed")?;

    write_works(&output, &records).context("Failed to write dataset")?;

    println!("\nHarvest Summary");
    println!("===============");
    println!("Pages fetched: {}", stats.pages_fetched);
    println!("Works written: {}", stats.works_written);
    println!("Duration: {}s", stats.duration_secs());
    println!("Rate: {:.1} works/min", stats.works_per_minute());
    println!("Dataset: {}", output.display());

    Ok(())
}

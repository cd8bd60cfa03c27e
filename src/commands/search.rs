use anyhow::{Context, Result};
use std::path::PathBuf;

use bibliotrend::config::Config;
use bibliotrend::harvest::{OpenLibraryFetcher, SearchHarvester};
use bibliotrend::storage::write_search_records;

pub async fn search(config: &Config, query: String, output: PathBuf) -> Result<()> {
    println!("Starting title search");
    println!("=====================");
    println!("  Query:  {query}");
    println!("  Output: {}", output.display());

    let fetcher = OpenLibraryFetcher::with_base_url(
        &config.harvest.base_url,
        config.request_timeout(),
        &config.harvest.user_agent,
    )
    .context("Failed to create fetcher")?;

    let harvester = SearchHarvester::new(fetcher);
    let (records, stats) = harvester.run(&query).await.context("Title search failed")?;

    write_search_records(&output, &records).context("Failed to write dataset")?;

    println!("\nSearch Summary");
    println!("==============");
    println!("Pages fetched: {}", stats.pages_fetched);
    println!("Matches kept:  {}", stats.works_written);
    println!("Duration: {}s", stats.duration_secs());
    println!("Dataset: {}", output.display());

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliotrend::config::Config;
use bibliotrend::models::YearWindow;

mod commands;

#[derive(Parser)]
#[command(
    name = "bibliotrend",
    version,
    about = "Open Library bibliography harvester with subject categorization and trend charts",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest a subject's works into a CSV dataset
    Harvest {
        /// Open Library subject to harvest
        #[arg(short, long, default_value = "artificial intelligence")]
        subject: String,

        /// Output CSV path
        #[arg(short, long, default_value = "data/works.csv")]
        output: PathBuf,

        /// Works per page (overrides config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Search works by title, keeping physical editions only
    Search {
        /// Search query; results must contain it in the title
        query: String,

        /// Output CSV path
        #[arg(short, long, default_value = "data/search.csv")]
        output: PathBuf,
    },

    /// Count subject frequencies across a harvested dataset
    Subjects {
        /// Input dataset CSV
        #[arg(short, long, default_value = "data/works.csv")]
        input: PathBuf,

        /// Output report CSV
        #[arg(short, long, default_value = "data/subject_counts.csv")]
        output: PathBuf,

        /// Subject to exclude from the counts (the harvested one)
        #[arg(short, long, default_value = "artificial intelligence")]
        exclude: String,
    },

    /// Render categorized time-series charts from a dataset
    Chart {
        /// Input dataset CSV
        #[arg(short, long, default_value = "data/works.csv")]
        input: PathBuf,

        /// Base directory for charts (overrides config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Year window as START:END; repeatable, defaults to the configured list
        #[arg(short, long)]
        window: Vec<YearWindow>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("bibliotrend starting");

    let config = Config::from_env()?;
    config.validate()?;

    match cli.command {
        Commands::Harvest {
            subject,
            output,
            limit,
        } => {
            tracing::info!(
                subject = %subject,
                output = %output.display(),
                limit = ?limit,
                "Starting harvest command"
            );
            let mut config = config;
            if let Some(limit) = limit {
                config.harvest.page_limit = limit;
                config.validate()?;
            }
            commands::harvest(&config, subject, output).await?;
        }

        Commands::Search { query, output } => {
            tracing::info!(
                query = %query,
                output = %output.display(),
                "Starting search command"
            );
            commands::search(&config, query, output).await?;
        }

        Commands::Subjects {
            input,
            output,
            exclude,
        } => {
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                exclude = %exclude,
                "Starting subjects command"
            );
            commands::subjects(input, output, exclude)?;
        }

        Commands::Chart {
            input,
            output_dir,
            window,
        } => {
            tracing::info!(
                input = %input.display(),
                output_dir = ?output_dir,
                windows = window.len(),
                "Starting chart command"
            );
            commands::chart(&config, input, output_dir, window)?;
        }
    }

    tracing::info!("bibliotrend completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("bibliotrend=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("bibliotrend=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

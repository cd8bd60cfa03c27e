//! Configuration management for the bibliotrend pipeline
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::YearWindow;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Harvesting configuration
    pub harvest: HarvestConfig,

    /// Chart pipeline configuration
    pub chart: ChartConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Harvest-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Open Library API root
    pub base_url: String,

    /// Works requested per subject page
    pub page_limit: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Chart pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Base directory for rendered charts
    pub output_dir: PathBuf,

    /// Global lower bound on publish years entering the pipeline
    pub min_year: i32,

    /// Global upper bound on publish years entering the pipeline
    pub max_year: i32,

    /// Year windows processed per run
    pub windows: Vec<YearWindow>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults; anything unparseable is
    /// ignored rather than fatal.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url =
            std::env::var("BIBLIOTREND_BASE_URL").unwrap_or(defaults.harvest.base_url);

        let page_limit = std::env::var("BIBLIOTREND_PAGE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.harvest.page_limit);

        let request_timeout_secs = std::env::var("BIBLIOTREND_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.harvest.request_timeout_secs);

        let user_agent =
            std::env::var("BIBLIOTREND_USER_AGENT").unwrap_or(defaults.harvest.user_agent);

        let output_dir = std::env::var("BIBLIOTREND_CHART_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.chart.output_dir);

        let min_year = std::env::var("BIBLIOTREND_MIN_YEAR")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(defaults.chart.min_year);

        let max_year = std::env::var("BIBLIOTREND_MAX_YEAR")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(defaults.chart.max_year);

        let level =
            std::env::var("BIBLIOTREND_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format =
            std::env::var("BIBLIOTREND_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            harvest: HarvestConfig {
                base_url,
                page_limit,
                request_timeout_secs,
                user_agent,
            },
            chart: ChartConfig {
                output_dir,
                min_year,
                max_year,
                windows: defaults.chart.windows,
            },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.harvest.page_limit == 0 {
            anyhow::bail!("page_limit must be greater than 0");
        }

        if self.harvest.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.chart.min_year > self.chart.max_year {
            anyhow::bail!(
                "min_year {} is after max_year {}",
                self.chart.min_year,
                self.chart.max_year
            );
        }

        for window in &self.chart.windows {
            if window.start > window.end {
                anyhow::bail!("invalid year window {window}");
            }
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.harvest.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            harvest: HarvestConfig {
                base_url: String::from("https://openlibrary.org"),
                page_limit: 100,
                request_timeout_secs: 30,
                user_agent: format!("bibliotrend/{}", env!("CARGO_PKG_VERSION")),
            },
            chart: ChartConfig {
                output_dir: PathBuf::from("charts"),
                min_year: 1950,
                max_year: 2024,
                windows: vec![
                    YearWindow::new(1950, 1982),
                    YearWindow::new(1950, 2012),
                    YearWindow::new(1950, 2024),
                    YearWindow::new(1970, 2005),
                    YearWindow::new(1970, 2012),
                    YearWindow::new(1970, 2024),
                    YearWindow::new(1982, 2005),
                    YearWindow::new(1982, 2012),
                    YearWindow::new(2012, 2024),
                ],
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

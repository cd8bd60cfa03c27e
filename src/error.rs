//! Unified error handling for the bibliotrend crate
//!
//! Domain-specific errors live next to their modules; this module wraps them
//! into a single [`Error`] enum usable across module boundaries, with a
//! crate-wide [`Result`] alias.

use std::io;
use thiserror::Error;

pub use crate::analytics::AnalyticsError;
pub use crate::charts::ChartError;
pub use crate::harvest::FetchError;
pub use crate::storage::DatasetError;

/// Unified error type for the bibliotrend crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Dataset I/O errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Aggregation errors
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Chart rendering errors
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error is recoverable (retrying the run may help)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => matches!(
                e,
                FetchError::Http(_) | FetchError::ServerError(429 | 500..=599)
            ),
            Self::Http(_) => true,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Dataset(_)
            | Self::Analytics(_)
            | Self::Chart(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other { .. } => false,
        }
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_recoverable() {
        let server_err = Error::Fetch(FetchError::ServerError(503));
        assert!(server_err.is_recoverable());

        let client_err = Error::Fetch(FetchError::ServerError(404));
        assert!(!client_err.is_recoverable());

        let range_err = Error::Analytics(AnalyticsError::InvalidRange {
            start: 2012,
            end: 1950,
        });
        assert!(!range_err.is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("page_limit must be greater than 0");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("page_limit"));
    }

    #[test]
    fn test_error_conversion() {
        let analytics_err = AnalyticsError::InvalidRange { start: 2, end: 1 };
        let unified: Error = analytics_err.into();
        assert!(matches!(unified, Error::Analytics(_)));
    }
}

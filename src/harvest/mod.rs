//! Open Library harvesting
//!
//! HTTP client and paginated harvesters for the two Open Library surfaces
//! the pipeline consumes: the subject works endpoint and the title search
//! endpoint. Retry/backoff and rate limiting are deliberately out of scope;
//! each request either succeeds or surfaces its error.

pub mod fetcher;
pub mod search;
pub mod subject;

pub use fetcher::OpenLibraryFetcher;
pub use search::{SearchDoc, SearchHarvester, SearchPage};
pub use subject::{SubjectHarvester, SubjectPage, SubjectWork};

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connect, timeout, body decode)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server responded with a non-success status
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

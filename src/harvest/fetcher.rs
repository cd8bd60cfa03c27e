//! HTTP fetcher for the Open Library JSON API
//!
//! A thin reqwest wrapper with a configurable timeout, gzip, and a base-URL
//! override so the paginated harvesters can run against a mock server in
//! tests.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::FetchError;

/// Production API root
const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Open Library JSON API client
pub struct OpenLibraryFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// API root all request paths are joined onto
    base_url: Url,
}

impl OpenLibraryFetcher {
    /// Create a new fetcher against the production API
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout, user_agent)
    }

    /// Create a new fetcher with a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` does not parse, or
    /// `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// GET a JSON document and deserialize it
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the API root, e.g. `subjects/love.json`
    /// * `query` - Query parameters appended to the URL
    ///
    /// # Errors
    ///
    /// `FetchError::ServerError` for a non-success status,
    /// `FetchError::Http` for transport or JSON-decode failures
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }

    /// The configured API root
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_creation() {
        let fetcher = OpenLibraryFetcher::new(Duration::from_secs(10), "bibliotrend/0.1");
        assert!(fetcher.is_ok());
        assert_eq!(
            fetcher.unwrap().base_url().as_str(),
            "https://openlibrary.org/"
        );
    }

    #[test]
    fn test_fetcher_with_base_url() {
        let fetcher = OpenLibraryFetcher::with_base_url(
            "http://localhost:8080",
            Duration::from_secs(5),
            "bibliotrend/0.1",
        );
        assert!(fetcher.is_ok());

        let bad = OpenLibraryFetcher::with_base_url(
            "not a url",
            Duration::from_secs(5),
            "bibliotrend/0.1",
        );
        assert!(matches!(bad, Err(FetchError::InvalidUrl(_))));
    }
}

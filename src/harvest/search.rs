//! Paginated title search with physical-format filtering
//!
//! Walks `/search.json` pages for a query and keeps documents that look
//! like printed books: title matches the query, at least one author, and a
//! format entry naming a physical binding.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::{FetchError, OpenLibraryFetcher};
use crate::models::{HarvestStats, SearchRecord};

/// Documents per search page, fixed by the API
const PAGE_SIZE: u64 = 100;

/// Format keywords that mark a physical edition
const PHYSICAL_FORMAT_KEYWORDS: &[&str] = &[
    "paperback",
    "paper",
    "softcover",
    "hardcover",
    "binding",
    "bind",
    "bound",
    "book",
];

/// Four-digit year anywhere in a free-text publish date
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex is valid"));

/// One page of the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,

    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// One document within a search page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author_name: Vec<String>,

    #[serde(default)]
    pub first_publish_year: Option<i32>,

    #[serde(default)]
    pub publish_date: Vec<String>,

    #[serde(default)]
    pub format: Vec<String>,

    #[serde(default)]
    pub publisher: Vec<String>,

    #[serde(default)]
    pub language: Vec<String>,
}

impl SearchDoc {
    /// Earliest known publish year
    ///
    /// Prefers `first_publish_year`; otherwise the minimum four-digit year
    /// found across the free-text `publish_date` entries.
    pub fn publish_year(&self) -> Option<i32> {
        if let Some(year) = self.first_publish_year {
            return Some(year);
        }

        self.publish_date
            .iter()
            .filter_map(|date| {
                YEAR_RE
                    .captures(date)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<i32>().ok())
            })
            .min()
    }

    /// Whether any format entry names a physical binding
    pub fn has_physical_format(&self) -> bool {
        self.format.iter().any(|format_item| {
            let lowered = format_item.to_lowercase();
            PHYSICAL_FORMAT_KEYWORDS
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
    }

    /// Whether the title contains the query, case-insensitively
    pub fn title_matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
    }
}

impl From<&SearchDoc> for SearchRecord {
    fn from(doc: &SearchDoc) -> Self {
        Self {
            title: doc.title.clone(),
            authors: doc.author_name.join(", "),
            publish_year: doc
                .publish_year()
                .map(|year| year.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            publishers: non_empty_join(&doc.publisher),
            language: non_empty_join(&doc.language),
        }
    }
}

fn non_empty_join(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

/// Paginated harvester for one search query
pub struct SearchHarvester {
    fetcher: OpenLibraryFetcher,
}

impl SearchHarvester {
    pub fn new(fetcher: OpenLibraryFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch every search page for `query` and filter to physical books
    ///
    /// The page count derives from the first page's `numFound`. A failed
    /// page is logged and skipped; rows from other pages still land.
    ///
    /// # Errors
    ///
    /// Returns the first page's `FetchError` only; without `numFound` there
    /// is nothing to paginate.
    pub async fn run(&self, query: &str) -> Result<(Vec<SearchRecord>, HarvestStats), FetchError> {
        let query_lower = query.to_lowercase();
        let mut stats = HarvestStats::begin();
        let mut records = Vec::new();

        let first = self.fetch_page(query, 1).await?;
        stats.pages_fetched += 1;
        let total_pages = first.num_found / PAGE_SIZE + 1;
        self.collect(&first, &query_lower, &mut records);

        for page_number in 2..=total_pages {
            match self.fetch_page(query, page_number).await {
                Ok(page) => {
                    stats.pages_fetched += 1;
                    self.collect(&page, &query_lower, &mut records);
                }
                Err(e) => {
                    tracing::warn!(page = page_number, error = %e, "Failed to fetch search page");
                }
            }
        }

        stats.works_written = records.len() as u32;
        stats.finish();
        Ok((records, stats))
    }

    async fn fetch_page(&self, query: &str, page: u64) -> Result<SearchPage, FetchError> {
        tracing::info!(query, page, "Fetching search page");
        self.fetcher
            .get_json(
                "search.json",
                &[("q", query.to_string()), ("page", page.to_string())],
            )
            .await
    }

    fn collect(&self, page: &SearchPage, query_lower: &str, records: &mut Vec<SearchRecord>) {
        for doc in &page.docs {
            if doc.title_matches(query_lower)
                && !doc.author_name.is_empty()
                && doc.has_physical_format()
            {
                records.push(SearchRecord::from(doc));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, formats: &[&str]) -> SearchDoc {
        SearchDoc {
            title: title.into(),
            author_name: vec!["An Author".into()],
            format: formats.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_physical_format_detection() {
        assert!(doc("t", &["Paperback"]).has_physical_format());
        assert!(doc("t", &["Trade hardcover"]).has_physical_format());
        assert!(doc("t", &["Perfect-bound"]).has_physical_format());
        assert!(!doc("t", &["Audio CD", "MP3"]).has_physical_format());
        assert!(!doc("t", &[]).has_physical_format());
        // substring matching means "ebook" counts as "book"
        assert!(doc("t", &["ebook"]).has_physical_format());
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let d = doc("The Lord of the Rings: Deluxe", &["Hardcover"]);
        assert!(d.title_matches("lord of the rings"));
        assert!(!d.title_matches("the hobbit"));
    }

    #[test]
    fn test_publish_year_prefers_first_publish_year() {
        let mut d = SearchDoc {
            first_publish_year: Some(1954),
            publish_date: vec!["June 1999".into()],
            ..Default::default()
        };
        assert_eq!(d.publish_year(), Some(1954));

        d.first_publish_year = None;
        assert_eq!(d.publish_year(), Some(1999));
    }

    #[test]
    fn test_publish_year_takes_minimum_date_year() {
        let d = SearchDoc {
            publish_date: vec![
                "2001".into(),
                "March 3, 1987".into(),
                "no date".into(),
                "1995-06".into(),
            ],
            ..Default::default()
        };
        assert_eq!(d.publish_year(), Some(1987));
    }

    #[test]
    fn test_publish_year_missing() {
        let d = SearchDoc {
            publish_date: vec!["undated".into()],
            ..Default::default()
        };
        assert_eq!(d.publish_year(), None);

        let record = SearchRecord::from(&d);
        assert_eq!(record.publish_year, "N/A");
    }

    #[test]
    fn test_record_joins_fields() {
        let d = SearchDoc {
            title: "T".into(),
            author_name: vec!["A".into(), "B".into()],
            publisher: vec!["P1".into(), "P2".into()],
            language: vec![],
            first_publish_year: Some(2000),
            ..Default::default()
        };

        let record = SearchRecord::from(&d);
        assert_eq!(record.authors, "A, B");
        assert_eq!(record.publishers, "P1, P2");
        assert_eq!(record.language, "N/A");
    }

    #[test]
    fn test_page_deserialization() {
        let json = r#"{"numFound": 205, "docs": [{"title": "X", "format": ["Hardcover"]}]}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.num_found, 205);
        assert_eq!(page.docs.len(), 1);
    }
}

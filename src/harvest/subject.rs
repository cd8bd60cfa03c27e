//! Paginated harvest of a subject's works
//!
//! Walks `/subjects/{slug}.json` with limit/offset pages until the reported
//! `work_count` is exhausted and flattens each work into a dataset row.

use serde::Deserialize;

use super::{FetchError, OpenLibraryFetcher};
use crate::models::{HarvestStats, WorkRecord};

/// One page of the subject works endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectPage {
    /// Total works the server reports for this subject
    #[serde(default)]
    pub work_count: u64,

    #[serde(default)]
    pub works: Vec<SubjectWork>,
}

/// One work entry within a subject page
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectWork {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    #[serde(default)]
    pub first_publish_year: Option<i32>,

    #[serde(default)]
    pub subject: Vec<String>,
}

/// Author reference embedded in a subject work
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub name: String,
}

impl From<SubjectWork> for WorkRecord {
    fn from(work: SubjectWork) -> Self {
        Self {
            title: work.title,
            authors: work
                .authors
                .into_iter()
                .map(|author| author.name)
                .collect::<Vec<_>>()
                .join(", "),
            publish_year: work
                .first_publish_year
                .map(|year| year.to_string())
                .unwrap_or_default(),
            subjects: work.subject.join(", "),
        }
    }
}

/// Paginated harvester for one subject
pub struct SubjectHarvester {
    fetcher: OpenLibraryFetcher,
    page_limit: u32,
}

impl SubjectHarvester {
    pub fn new(fetcher: OpenLibraryFetcher, page_limit: u32) -> Self {
        Self {
            fetcher,
            page_limit: page_limit.max(1),
        }
    }

    /// Fetch every page of works for `subject`
    ///
    /// Pagination stops when `offset + limit` reaches the server-reported
    /// `work_count`, or earlier if the server returns an empty page (a
    /// misreported count must not loop forever).
    ///
    /// # Errors
    ///
    /// Propagates the first page-level `FetchError`; rows collected before
    /// the failure are lost with it, the caller decides whether to rerun.
    pub async fn run(&self, subject: &str) -> Result<(Vec<WorkRecord>, HarvestStats), FetchError> {
        let slug = subject_slug(subject);
        let path = format!("subjects/{slug}.json");

        let mut stats = HarvestStats::begin();
        let mut records = Vec::new();
        let mut offset: u64 = 0;

        loop {
            tracing::info!(subject = %slug, offset, "Fetching subject page");

            let page: SubjectPage = self
                .fetcher
                .get_json(
                    &path,
                    &[
                        ("limit", self.page_limit.to_string()),
                        ("offset", offset.to_string()),
                    ],
                )
                .await?;
            stats.pages_fetched += 1;

            if page.works.is_empty() {
                break;
            }

            records.extend(page.works.into_iter().map(WorkRecord::from));

            if offset + u64::from(self.page_limit) >= page.work_count {
                break;
            }
            offset += u64::from(self.page_limit);
        }

        stats.works_written = records.len() as u32;
        stats.finish();
        Ok((records, stats))
    }
}

/// Endpoint slug for a subject name: lower-case, spaces as underscores
pub fn subject_slug(subject: &str) -> String {
    subject.trim().to_lowercase().replace(' ', "_")
}

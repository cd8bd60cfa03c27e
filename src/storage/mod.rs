//! CSV dataset persistence
//!
//! This module handles reading and writing the delimited datasets the
//! pipeline exchanges: harvested work records, title-search results, and
//! the subject frequency report.

pub mod dataset;
pub mod subjects;

pub use dataset::{read_works, write_search_records, write_works};
pub use subjects::{subject_frequencies, write_frequencies};

use thiserror::Error;

/// Errors that can occur during dataset I/O
#[derive(Error, Debug)]
pub enum DatasetError {
    /// CSV encode/decode error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

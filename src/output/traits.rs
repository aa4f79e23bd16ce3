//! Result writer trait and error types

use crate::model::ResultMapping;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for result writers
///
/// A writer persists the complete result of one parser run. It is called once
/// per run, after the crawl has finished.
pub trait ResultWriter: Send + Sync {
    /// Path of the file that results for `domain` are written to
    fn output_path(&self, domain: &str) -> PathBuf;

    /// Writes the results of a run
    ///
    /// # Arguments
    ///
    /// * `domain` - Domain of the site that was scraped
    /// * `mapping` - Everything scraped during the run
    ///
    /// # Returns
    ///
    /// The path that was written
    fn write(&self, domain: &str, mapping: &ResultMapping) -> OutputResult<PathBuf>;
}

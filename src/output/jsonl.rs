//! Append-mode JSON Lines writer
//!
//! Every run appends one line holding a complete JSON document, so the file
//! stays readable line by line no matter how many runs it has seen.

use crate::model::ResultMapping;
use crate::output::json::ensure_parent;
use crate::output::traits::{OutputError, OutputResult, ResultWriter};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// One appended line
#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    site: &'a str,
    finished_at: DateTime<Utc>,
    words: &'a ResultMapping,
}

/// Appends one line per run to `<directory>/<domain>.jsonl`
#[derive(Debug, Clone)]
pub struct JsonLinesWriter {
    directory: PathBuf,
}

impl JsonLinesWriter {
    /// Creates a writer for the given output directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl ResultWriter for JsonLinesWriter {
    fn output_path(&self, domain: &str) -> PathBuf {
        self.directory.join(format!("{}.jsonl", domain))
    }

    fn write(&self, domain: &str, mapping: &ResultMapping) -> OutputResult<PathBuf> {
        let path = self.output_path(domain);
        ensure_parent(&path)?;

        let record = RunRecord {
            site: domain,
            finished_at: Utc::now(),
            words: mapping,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| OutputError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!("Appended {} words to {}", mapping.len(), path.display());
        Ok(path)
    }
}

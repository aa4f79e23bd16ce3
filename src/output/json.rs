//! Single-document JSON writer

use crate::model::ResultMapping;
use crate::output::traits::{OutputError, OutputResult, ResultWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `<directory>/<domain>.json`, replacing any previous content
#[derive(Debug, Clone)]
pub struct JsonWriter {
    directory: PathBuf,
}

impl JsonWriter {
    /// Creates a writer for the given output directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl ResultWriter for JsonWriter {
    fn output_path(&self, domain: &str) -> PathBuf {
        self.directory.join(format!("{}.json", domain))
    }

    fn write(&self, domain: &str, mapping: &ResultMapping) -> OutputResult<PathBuf> {
        let path = self.output_path(domain);
        ensure_parent(&path)?;

        let file = File::create(&path).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, mapping)?;
        writer.flush().map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Wrote {} words to {}", mapping.len(), path.display());
        Ok(path)
    }
}

/// Creates the parent directory of `path` if it is missing
pub(crate) fn ensure_parent(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

//! Output module for persisting scrape results
//!
//! This module handles:
//! - Writing one result file per site, whole-file or append
//! - Computing and reporting run statistics

mod json;
mod jsonl;
pub mod stats;
mod traits;

pub use json::JsonWriter;
pub use jsonl::JsonLinesWriter;
pub use stats::{print_statistics, RunStats};
pub use traits::{OutputError, OutputResult, ResultWriter};

use crate::config::{OutputConfig, WriteMode};

/// Builds the writer selected by the output configuration
pub fn writer_for(config: &OutputConfig) -> Box<dyn ResultWriter> {
    match config.mode {
        WriteMode::Overwrite => Box::new(JsonWriter::new(&config.directory)),
        WriteMode::Append => Box::new(JsonLinesWriter::new(&config.directory)),
    }
}

//! Statistics for a finished parser run

use crate::model::ResultMapping;

/// Counts describing one result mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of words scraped
    pub words: usize,

    /// Number of definitions across all words
    pub descriptions: usize,

    /// Number of example sentences across all definitions
    pub examples: usize,

    /// Words whose detail page had the content container but no definition
    pub words_without_descriptions: usize,
}

impl RunStats {
    /// Computes statistics from a result mapping
    pub fn from_mapping(mapping: &ResultMapping) -> Self {
        let mut stats = Self {
            words: mapping.len(),
            ..Self::default()
        };

        for (_, entry) in mapping {
            stats.descriptions += entry.description.len();
            stats.examples += entry.example_count();
            if entry.description.is_empty() {
                stats.words_without_descriptions += 1;
            }
        }

        stats
    }

    /// Logs the statistics for a site
    pub fn log(&self, domain: &str) {
        tracing::info!(
            "{}: {} words, {} definitions, {} examples",
            domain,
            self.words,
            self.descriptions,
            self.examples
        );

        if self.words_without_descriptions > 0 {
            tracing::warn!(
                "{}: {} words had no definitions; the page layout may have changed",
                domain,
                self.words_without_descriptions
            );
        }
    }
}

/// Prints run statistics to stdout
pub fn print_statistics(domain: &str, stats: &RunStats) {
    println!("=== {} ===", domain);
    println!("  Words:        {}", stats.words);
    println!("  Definitions:  {}", stats.descriptions);
    println!("  Examples:     {}", stats.examples);
    if stats.words_without_descriptions > 0 {
        println!("  Empty words:  {}", stats.words_without_descriptions);
    }
}

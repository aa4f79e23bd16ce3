//! Grammar-Scraper: dictionary site scraper
//!
//! This crate downloads dictionary entries from registered websites, extracts
//! word, definition and example data from their markup, and writes one JSON
//! file per site.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod sites;
pub mod url;

use thiserror::Error;

/// Main error type for Grammar-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("No parser registered for domain '{domain}'")]
    UnknownSite { domain: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parser processes failed for: {}", failed.join(", "))]
    ParallelRun { failed: Vec<String> },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Grammar-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Dispatcher, Fetcher};
pub use model::{DescriptionMap, MergePolicy, ResultMapping, WordEntry};
pub use sites::{Registry, SiteParser};
pub use url::get_domain;

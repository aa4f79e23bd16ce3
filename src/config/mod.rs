//! Configuration module for Grammar-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file means the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use grammar_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Writing output to: {}", config.output.directory.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, SiteConfig, SiteKind, UserAgentConfig, WriteMode,
    DICTIONARY_COM_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

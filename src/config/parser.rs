use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates TOML configuration text
///
/// Sections left out of the text fall back to their defaults, so an empty
/// string yields a config that scrapes dictionary.com into the current
/// directory.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Reads a configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use grammar_scraper::config::load_config;
///
/// let config = load_config(Path::new("sites.toml")).unwrap();
/// for site in &config.sites {
///     println!("{}", site.url);
/// }
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hex SHA-256 digest of a configuration file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(digest(&std::fs::read_to_string(path)?))
}

/// Reads a configuration file once, returning the config and the digest of
/// the exact text it was parsed from
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, digest(&content)))
}

fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

use crate::model::MergePolicy;
use serde::Deserialize;
use std::path::PathBuf;

/// Root page of the built-in dictionary.com site
pub const DICTIONARY_COM_URL: &str = "https://www.dictionary.com/";

/// Main configuration structure for Grammar-Scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "site", default = "default_sites")]
    pub sites: Vec<SiteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: UserAgentConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
            sites: default_sites(),
        }
    }
}

fn default_sites() -> Vec<SiteConfig> {
    vec![SiteConfig {
        kind: SiteKind::DictionaryCom,
        url: DICTIONARY_COM_URL.to_string(),
    }]
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

/// How result files are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// One JSON document per site, replaced on every run
    #[default]
    Overwrite,
    /// One JSON line per run, appended to the site's file
    Append,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the per-site result files
    pub directory: PathBuf,

    /// Write mode for result files
    pub mode: WriteMode,

    /// How a word seen more than once in a run is merged
    pub merge: MergePolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            mode: WriteMode::default(),
            merge: MergePolicy::default(),
        }
    }
}

/// Site layouts with a parser implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteKind {
    /// dictionary.com letter index and entry pages
    DictionaryCom,
}

impl SiteKind {
    /// Returns the configuration name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DictionaryCom => "dictionary-com",
        }
    }
}

/// A site to scrape
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Which parser understands this site's markup
    pub kind: SiteKind,

    /// Root page the crawl starts from
    pub url: String,
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the site parsers:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests returning the page body and its final URL
//! - Error classification for transport failures

use crate::config::{HttpConfig, UserAgentConfig};
use crate::ScrapeError;
use reqwest::{redirect::Policy, Client};
use scraper::Html;
use std::time::Duration;
use url::Url;

/// A downloaded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

impl FetchedPage {
    /// Parses the body into a navigable markup tree
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeouts and redirect limit
///
/// # Example
///
/// ```no_run
/// use grammar_scraper::config::{HttpConfig, UserAgentConfig};
/// use grammar_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests on behalf of a site parser
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a client built from configuration
    pub fn new(user_agent: &UserAgentConfig, http: &HttpConfig) -> Result<Self, ScrapeError> {
        Ok(Self::with_client(build_http_client(user_agent, http)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and returns its body
    ///
    /// # Error Handling
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 2xx | Body returned |
    /// | HTTP 4xx / 5xx | Logged, body returned |
    /// | Timeout | `ScrapeError::Http` |
    /// | Connection refused / DNS | `ScrapeError::Http` |
    /// | Body decode failure | `ScrapeError::Http` |
    ///
    /// Error pages are still handed back because the parsers treat a page
    /// without the expected markup as empty. There is no retry.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| classify_error(url, source))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|source| classify_error(url, source))?;

        let page = FetchedPage {
            url: final_url,
            status_code,
            body,
        };

        if !page.is_success() {
            tracing::warn!("{} returned HTTP {}", url, page.status_code);
        }

        Ok(page)
    }
}

fn classify_error(url: &str, source: reqwest::Error) -> ScrapeError {
    if source.is_timeout() {
        tracing::error!("Request timeout for {}", url);
    } else if source.is_connect() {
        tracing::error!("Connection failed for {}", url);
    } else if source.is_redirect() {
        tracing::error!("Too many redirects from {}", url);
    }

    ScrapeError::Http {
        url: url.to_string(),
        source,
    }
}

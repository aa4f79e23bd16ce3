//! URL handling module for Grammar-Scraper
//!
//! This module provides domain resolution for registry lookups, link
//! resolution for scraped hrefs, and index page numbering.

mod domain;

pub use domain::get_domain;

use url::Url;

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Builds the URL of one page of a paginated index
///
/// Page 0 is the index link itself; page `n` appends `/n` to it.
///
/// # Examples
///
/// ```
/// use grammar_scraper::url::page_url;
///
/// assert_eq!(page_url("https://example.com/list/a", 0), "https://example.com/list/a");
/// assert_eq!(page_url("https://example.com/list/a", 2), "https://example.com/list/a/2");
/// assert_eq!(page_url("https://example.com/list/a/", 1), "https://example.com/list/a/1");
/// ```
pub fn page_url(link: &str, page: u32) -> String {
    if page == 0 {
        link.to_string()
    } else {
        format!("{}/{}", link.trim_end_matches('/'), page)
    }
}

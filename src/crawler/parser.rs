//! Markup helpers shared by the site parsers
//!
//! This module handles the site-independent parts of scraping a page:
//! - Compiling CSS selectors once, with readable errors
//! - Collecting the visible text of an element
//! - Extracting `(text, absolute URL)` pairs from anchors

use crate::url::resolve_link;
use crate::ScrapeError;
use scraper::{ElementRef, Selector};
use url::Url;

/// An anchor found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Visible text of the anchor, trimmed
    pub text: String,

    /// Absolute target of the anchor
    pub url: Url,
}

/// Compiles a CSS selector
///
/// # Example
///
/// ```
/// use grammar_scraper::crawler::compile_selector;
///
/// assert!(compile_selector("div.entry > a[href]").is_ok());
/// assert!(compile_selector("div..entry").is_err());
/// ```
pub fn compile_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Collects all text below an element, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the text of the first descendant matching `selector`
pub fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(element_text)
}

/// Extracts every anchor below `element` matching `selector`
///
/// Anchors whose href cannot be resolved to an HTTP(S) URL are skipped.
pub fn extract_links(element: ElementRef<'_>, selector: &Selector, base_url: &Url) -> Vec<Link> {
    let mut links = Vec::new();

    for anchor in element.select(selector) {
        if let Some(href) = anchor.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                links.push(Link {
                    text: element_text(anchor),
                    url,
                });
            }
        }
    }

    links
}

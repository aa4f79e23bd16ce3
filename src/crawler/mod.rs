//! Crawler module for page fetching and run dispatch
//!
//! This module contains the site-independent crawling machinery:
//! - HTTP fetching
//! - Markup helpers used by the site parsers
//! - Dispatching parser runs sequentially or as separate processes

mod dispatcher;
mod fetcher;
mod parser;

pub use dispatcher::{Dispatcher, ProcessLauncher, RunReport};
pub use fetcher::{build_http_client, FetchedPage, Fetcher};
pub use parser::{compile_selector, element_text, extract_links, first_text, Link};


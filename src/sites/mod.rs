//! Site parsers and their registry
//!
//! Each supported website has one [`SiteParser`] implementation that knows its
//! markup. The [`Registry`] maps the domain of every configured site to the
//! constructor of the parser for that site's [`SiteKind`].

mod dictionary_com;

pub use dictionary_com::{DetailPage, DictionaryCom, IndexPage};

use crate::config::{Config, SiteConfig, SiteKind};
use crate::crawler::Fetcher;
use crate::model::{MergePolicy, ResultMapping};
use crate::url::get_domain;
use crate::ScrapeError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use url::Url;

/// Site-specific extraction logic for one website
#[async_trait]
pub trait SiteParser: Send + Sync {
    /// Short name of the site layout
    fn name(&self) -> &'static str;

    /// Root page of the site
    fn url(&self) -> &Url;

    /// Registry key of the site
    fn domain(&self) -> String {
        get_domain(self.url().as_str())
    }

    /// Crawls the whole site and returns everything scraped
    ///
    /// The mapping is built in memory and only returned once the crawl is
    /// complete; a transport failure part way through discards it.
    async fn parse(&self, fetcher: &Fetcher) -> Result<ResultMapping, ScrapeError>;
}

/// Builds a parser for a configured site
pub type SiteConstructor = fn(&SiteConfig, MergePolicy) -> Result<Box<dyn SiteParser>, ScrapeError>;

/// Returns the constructor for a site layout
pub fn constructor_for(kind: SiteKind) -> SiteConstructor {
    match kind {
        SiteKind::DictionaryCom => build_dictionary_com,
    }
}

fn build_dictionary_com(
    site: &SiteConfig,
    merge: MergePolicy,
) -> Result<Box<dyn SiteParser>, ScrapeError> {
    let parser = DictionaryCom::new(Url::parse(&site.url)?, merge)?;
    Ok(Box::new(parser))
}

/// A configured site ready to be instantiated
#[derive(Clone)]
pub struct RegisteredSite {
    /// Site configuration
    pub site: SiteConfig,

    /// Registry key
    pub domain: String,

    merge: MergePolicy,
    constructor: SiteConstructor,
}

impl std::fmt::Debug for RegisteredSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredSite")
            .field("site", &self.site)
            .field("domain", &self.domain)
            .field("merge", &self.merge)
            .finish_non_exhaustive()
    }
}

impl RegisteredSite {
    /// Instantiates the parser for this site
    pub fn build(&self) -> Result<Box<dyn SiteParser>, ScrapeError> {
        (self.constructor)(&self.site, self.merge)
    }
}

/// Domain to parser constructor mapping
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sites: BTreeMap<String, RegisteredSite>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every site of a configuration
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for site in &config.sites {
            registry.register(site.clone(), config.output.merge);
        }
        registry
    }

    /// Registers a site under its domain, replacing any previous entry
    pub fn register(&mut self, site: SiteConfig, merge: MergePolicy) {
        let domain = get_domain(&site.url);
        let constructor = constructor_for(site.kind);
        self.sites.insert(
            domain.clone(),
            RegisteredSite {
                site,
                domain,
                merge,
                constructor,
            },
        );
    }

    /// Looks up a site by domain
    pub fn get(&self, domain: &str) -> Option<&RegisteredSite> {
        self.sites.get(domain)
    }

    /// Looks up the site serving a URL
    ///
    /// # Returns
    ///
    /// * `Ok(&RegisteredSite)` - The URL's domain is registered
    /// * `Err(ScrapeError::UnknownSite)` - No site has that domain
    pub fn resolve(&self, url: &str) -> Result<&RegisteredSite, ScrapeError> {
        let domain = get_domain(url);
        self.sites
            .get(&domain)
            .ok_or(ScrapeError::UnknownSite { domain })
    }

    /// Registered domains in sorted order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Registered sites in domain order
    pub fn sites(&self) -> impl Iterator<Item = &RegisteredSite> {
        self.sites.values()
    }

    /// Number of registered sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

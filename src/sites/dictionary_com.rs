//! dictionary.com parser
//!
//! The crawl walks three kinds of pages:
//! - the root page, listing one index link per letter
//! - paginated letter indexes (`<link>`, `<link>/1`, `<link>/2`, ...) holding
//!   blocks of word links
//! - word detail pages holding definitions and example sentences
//!
//! All markup is matched by style class. When the site changes its classes the
//! parser finds nothing and returns an empty mapping rather than failing.

use crate::crawler::{
    compile_selector, element_text, extract_links, first_text, FetchedPage, Fetcher, Link,
};
use crate::model::{DescriptionMap, MergePolicy, ResultMapping, WordEntry};
use crate::sites::SiteParser;
use crate::url::{page_url, resolve_link};
use crate::ScrapeError;
use async_trait::async_trait;
use scraper::Selector;
use url::Url;

const LETTER_ITEM: &str = "li.W2JN1pnuwI8hO1n0WQkT";
const ANCHOR: &str = "a[href]";
const WORD_BLOCK: &str = "div.sw3o2JSDU4SEB11F3dUQ";
const ENTRY_CONTENT: &str = "div.css-10n3ydx.e1hk9ate0";
const DEFINITION_BLOCK: &str = "div";
const LABEL: &str = "span.luna-label.italic";
const DEFINITION: &str = "span.one-click-content.css-nnyc96.e1q3nk1v1";
const EXAMPLE: &str = "span.luna-example.italic";

/// Word links found on one page of a letter index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexPage {
    /// Number of word blocks on the page; zero ends the letter
    pub blocks: usize,

    /// Word links from every block, in page order
    pub words: Vec<Link>,
}

/// Definitions scraped from one word detail page
pub type DetailPage = DescriptionMap;

#[derive(Debug)]
struct Selectors {
    letter_item: Selector,
    anchor: Selector,
    word_block: Selector,
    entry_content: Selector,
    definition_block: Selector,
    label: Selector,
    definition: Selector,
    example: Selector,
}

impl Selectors {
    fn compile() -> Result<Self, ScrapeError> {
        Ok(Self {
            letter_item: compile_selector(LETTER_ITEM)?,
            anchor: compile_selector(ANCHOR)?,
            word_block: compile_selector(WORD_BLOCK)?,
            entry_content: compile_selector(ENTRY_CONTENT)?,
            definition_block: compile_selector(DEFINITION_BLOCK)?,
            label: compile_selector(LABEL)?,
            definition: compile_selector(DEFINITION)?,
            example: compile_selector(EXAMPLE)?,
        })
    }
}

/// Parser for dictionary.com
#[derive(Debug)]
pub struct DictionaryCom {
    url: Url,
    merge: MergePolicy,
    selectors: Selectors,
}

impl DictionaryCom {
    /// Creates a parser rooted at `url`
    pub fn new(url: Url, merge: MergePolicy) -> Result<Self, ScrapeError> {
        Ok(Self {
            url,
            merge,
            selectors: Selectors::compile()?,
        })
    }

    /// Extracts the per-letter index links from the root page
    ///
    /// Only the first link of each letter item is used. Relative links
    /// resolve against the page's final URL.
    pub fn letter_links(&self, page: &FetchedPage) -> Vec<Url> {
        let document = page.document();

        document
            .select(&self.selectors.letter_item)
            .filter_map(|item| item.select(&self.selectors.anchor).next())
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| resolve_link(href, &page.url))
            .collect()
    }

    /// Extracts the word blocks of one letter index page
    pub fn index_page(&self, page: &FetchedPage) -> IndexPage {
        let document = page.document();
        let mut index = IndexPage::default();

        for block in document.select(&self.selectors.word_block) {
            index.blocks += 1;
            index
                .words
                .extend(extract_links(block, &self.selectors.anchor, &page.url));
        }

        index
    }

    /// Extracts the definitions of a word detail page
    ///
    /// Returns `None` when the page has no entry content container. Inside
    /// the container every `div` holding a definition contributes one key,
    /// `"<label>. <definition>"` or just `"<definition>"` when unlabelled,
    /// mapped to its examples. Keys keep page order; a repeated key replaces
    /// the earlier value in place.
    pub fn detail_page(&self, page: &FetchedPage) -> Option<DetailPage> {
        let document = page.document();
        let content = document.select(&self.selectors.entry_content).next()?;
        let mut description = DescriptionMap::new();

        for block in content.select(&self.selectors.definition_block) {
            let definition = match first_text(block, &self.selectors.definition) {
                Some(text) if !text.is_empty() => text,
                _ => continue,
            };

            let key = match first_text(block, &self.selectors.label) {
                Some(label) if !label.is_empty() => format!("{}. {}", label, definition),
                _ => definition,
            };

            let examples = block
                .select(&self.selectors.example)
                .map(element_text)
                .collect();

            description.insert(key, examples);
        }

        Some(description)
    }
}

#[async_trait]
impl SiteParser for DictionaryCom {
    fn name(&self) -> &'static str {
        "dictionary-com"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    async fn parse(&self, fetcher: &Fetcher) -> Result<ResultMapping, ScrapeError> {
        let domain = self.domain();
        let mut words = ResultMapping::new();

        let root = fetcher.fetch(self.url.as_str()).await?;
        let letters = self.letter_links(&root);
        tracing::info!("{}: {} letter indexes", domain, letters.len());

        let mut counter = 0usize;

        for letter in &letters {
            let mut page = 0u32;

            loop {
                let link = page_url(letter.as_str(), page);
                let fetched = fetcher.fetch(&link).await?;
                let index = self.index_page(&fetched);

                if index.blocks == 0 {
                    tracing::debug!("No word blocks at {}", link);
                    break;
                }

                for word in index.words {
                    tracing::debug!("{}: {}", counter, word.url);
                    counter += 1;

                    let detail = fetcher.fetch(word.url.as_str()).await?;
                    match self.detail_page(&detail) {
                        Some(description) => {
                            let entry = WordEntry::new(word.url.as_str(), description);
                            words.insert(word.text, entry, self.merge);
                        }
                        None => {
                            tracing::debug!("No entry content for '{}' at {}", word.text, word.url)
                        }
                    }
                }

                page += 1;
            }

            tracing::info!(
                "{}: finished {} after {} pages, {} words so far",
                domain,
                letter,
                page,
                words.len()
            );
        }

        Ok(words)
    }
}

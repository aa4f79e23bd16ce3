use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Formatted definition text mapped to its example sentences, in page order
pub type DescriptionMap = IndexMap<String, Vec<String>>;

/// Everything scraped for one word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Detail page the entry was scraped from
    pub url: String,

    /// Definitions and their examples
    pub description: DescriptionMap,
}

impl WordEntry {
    /// Creates an entry for a detail page
    pub fn new(url: impl Into<String>, description: DescriptionMap) -> Self {
        Self {
            url: url.into(),
            description,
        }
    }

    /// Total number of example sentences across all definitions
    pub fn example_count(&self) -> usize {
        self.description.values().map(Vec::len).sum()
    }
}

/// How a word that is scraped more than once in a run is combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// The latest entry replaces the previous one
    #[default]
    Replace,
    /// Definitions are merged and example lists extended
    Accumulate,
}

/// Word text mapped to its entry, for one parser run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMapping {
    words: BTreeMap<String, WordEntry>,
}

impl ResultMapping {
    /// Creates an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word according to the merge policy
    ///
    /// With [`MergePolicy::Accumulate`], examples already present under a
    /// definition are not added twice and the URL becomes the latest one.
    pub fn insert(&mut self, word: impl Into<String>, entry: WordEntry, policy: MergePolicy) {
        let word = word.into();

        match policy {
            MergePolicy::Replace => {
                self.words.insert(word, entry);
            }
            MergePolicy::Accumulate => match self.words.entry(word) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                btree_map::Entry::Occupied(mut slot) => {
                    let existing = slot.get_mut();
                    existing.url = entry.url;
                    for (definition, examples) in entry.description {
                        let known = existing.description.entry(definition).or_default();
                        for example in examples {
                            if !known.contains(&example) {
                                known.push(example);
                            }
                        }
                    }
                }
            },
        }
    }

    /// Looks up a word
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(word)
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no word has been scraped
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over words in sorted order
    pub fn iter(&self) -> btree_map::Iter<'_, String, WordEntry> {
        self.words.iter()
    }
}

impl<'a> IntoIterator for &'a ResultMapping {
    type Item = (&'a String, &'a WordEntry);
    type IntoIter = btree_map::Iter<'a, String, WordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

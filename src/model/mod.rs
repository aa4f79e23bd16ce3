//! Data model for scraped dictionary entries
//!
//! A run of one site parser produces a [`ResultMapping`]: word text mapped to
//! a [`WordEntry`] holding the detail page URL and a [`DescriptionMap`].

mod mapping;

pub use mapping::{DescriptionMap, MergePolicy, ResultMapping, WordEntry};

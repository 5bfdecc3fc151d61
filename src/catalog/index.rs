//! Inverted indexes used by the catalog.
//!
//! Both the category index and the term index map a string key to the list
//! of product ids filed under it, in the order the ids were appended. Lists
//! are not deduplicated: a product whose text repeats a word is appended once
//! per occurrence. Callers that need set semantics collect into an [`IdSet`].

use std::collections::{HashMap, HashSet};

use super::product::ProductId;

#[cfg(feature = "fxhash")]
type IdHasher = rustc_hash::FxBuildHasher;

#[cfg(not(feature = "fxhash"))]
type IdHasher = std::collections::hash_map::RandomState;

/// Unordered, deduplicated set of product ids.
///
/// With the `fxhash` feature the set uses `FxHash`, which is faster for
/// integer keys but not `HashDoS` resistant.
pub type IdSet = HashSet<ProductId, IdHasher>;

/// Splits text into lowercase terms on Unicode whitespace.
///
/// # Examples
///
/// ```rust
/// use catalog_fanout::catalog::tokenize;
///
/// assert_eq!(tokenize("Desc  Alpha\tbeta"), vec!["desc", "alpha", "beta"]);
/// assert!(tokenize("   ").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// A mapping from key to the ordered list of ids filed under it.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<ProductId>>,
}

impl InvertedIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the postings of `key`, creating the list if needed.
    pub fn append(&mut self, key: &str, id: ProductId) {
        if let Some(ids) = self.postings.get_mut(key) {
            ids.push(id);
        } else {
            self.postings.insert(key.to_owned(), vec![id]);
        }
    }

    /// Returns the ids filed under `key`, or an empty slice.
    #[must_use]
    pub fn postings(&self, key: &str) -> &[ProductId] {
        self.postings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Iterates over every id in every posting list.
    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.postings.values().flatten().copied()
    }

    /// Unions the postings of every key into a deduplicated set.
    pub fn union<'a, I>(&self, keys: I) -> IdSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids = IdSet::default();
        for key in keys {
            ids.extend(self.postings(key).iter().copied());
        }
        ids
    }
}

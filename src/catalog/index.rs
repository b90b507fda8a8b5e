//! Indexed, read-only view of a catalog snapshot.
//!
//! Every structure here is a `BTreeMap`/`BTreeSet`, so an index built from
//! any permutation of the same items is identical: same iteration order, same
//! token sets, same fingerprint.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

use crate::catalog::item::CatalogItem;
use crate::catalog::tokenize::tokenize;
use crate::error::{FinderError, Result};

/// One catalog item plus the token sets derived from it.
#[derive(Debug, Clone)]
pub struct IndexedItem {
    item: CatalogItem,
    tokens: BTreeSet<String>,
    keyword_tokens: BTreeSet<String>,
    name_tokens: BTreeSet<String>,
    description_tokens: BTreeSet<String>,
    name_token_len: usize,
}

impl IndexedItem {
    fn new(item: CatalogItem) -> Self {
        let keyword_tokens: BTreeSet<String> = tokenize(&item.keyword_text()).into_iter().collect();
        let name_stream = tokenize(&item.display_name);
        let name_token_len = name_stream.len();
        let name_tokens: BTreeSet<String> = name_stream.into_iter().collect();
        let description_tokens: BTreeSet<String> =
            tokenize(&item.description).into_iter().collect();

        let tokens = name_tokens
            .iter()
            .chain(description_tokens.iter())
            .chain(keyword_tokens.iter())
            .cloned()
            .collect();

        Self {
            item,
            tokens,
            keyword_tokens,
            name_tokens,
            description_tokens,
            name_token_len,
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn identifier(&self) -> &str {
        &self.item.identifier
    }

    /// Deduplicated tokens across name, description and keywords.
    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn keyword_tokens(&self) -> &BTreeSet<String> {
        &self.keyword_tokens
    }

    pub fn name_tokens(&self) -> &BTreeSet<String> {
        &self.name_tokens
    }

    pub fn description_tokens(&self) -> &BTreeSet<String> {
        &self.description_tokens
    }

    /// Size of the deduplicated token set.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Display-name token count with repeats, matching how query tokens
    /// are counted. Used for tie-breaking.
    pub fn name_token_count(&self) -> usize {
        self.name_token_len
    }
}

/// Catalog snapshot with per-item token sets and an inverted token map.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: BTreeMap<String, IndexedItem>,
    inverted: BTreeMap<String, BTreeSet<String>>,
}

impl CatalogIndex {
    /// Build an index from a full set of items.
    ///
    /// Fails on the first duplicate identifier or invalid item. An empty set
    /// is valid and yields an empty index.
    pub fn build<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = CatalogItem>,
    {
        let mut entries = BTreeMap::new();
        for item in items {
            validate_item(&item)?;
            if entries.contains_key(&item.identifier) {
                return Err(FinderError::DuplicateIdentifier(item.identifier));
            }
            entries.insert(item.identifier.clone(), IndexedItem::new(item));
        }

        let mut inverted: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (id, entry) in &entries {
            for token in &entry.tokens {
                inverted
                    .entry(token.clone())
                    .or_default()
                    .insert(id.clone());
            }
        }

        tracing::debug!(
            items = entries.len(),
            vocabulary = inverted.len(),
            "built catalog index"
        );

        Ok(Self { entries, inverted })
    }

    /// Number of items in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token set for one item in sorted order, `None` for unknown ids.
    pub fn tokens(&self, identifier: &str) -> Option<Vec<&str>> {
        self.entries
            .get(identifier)
            .map(|entry| entry.tokens.iter().map(String::as_str).collect())
    }

    /// Every identifier in the snapshot.
    pub fn all_identifiers(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn item(&self, identifier: &str) -> Option<&CatalogItem> {
        self.entries.get(identifier).map(IndexedItem::item)
    }

    pub fn entry(&self, identifier: &str) -> Option<&IndexedItem> {
        self.entries.get(identifier)
    }

    /// Iterates indexed items in identifier order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexedItem> {
        self.entries.values()
    }

    /// Identifiers of items whose token set contains `token`.
    pub fn items_containing(&self, token: &str) -> Option<&BTreeSet<String>> {
        self.inverted.get(token)
    }

    /// All distinct tokens across the catalog, sorted.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.inverted.keys().map(String::as_str)
    }

    /// Category id mapped to the identifiers it groups.
    pub fn categories(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut out: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entry in self.entries.values() {
            out.entry(entry.item.category.as_str())
                .or_default()
                .push(entry.identifier());
        }
        out
    }

    /// SHA-256 digest over everything scoring depends on.
    ///
    /// Two indexes with the same fingerprint resolve every query identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (id, entry) in &self.entries {
            hasher.update(id.as_bytes());
            hasher.update([0]);
            hasher.update(entry.item.category.as_bytes());
            hasher.update(entry.name_token_len.to_string().as_bytes());
            for (tag, set) in [
                (b'k', &entry.keyword_tokens),
                (b'n', &entry.name_tokens),
                (b'd', &entry.description_tokens),
            ] {
                hasher.update([0, tag]);
                for token in set {
                    hasher.update(token.as_bytes());
                    hasher.update([b' ']);
                }
            }
            hasher.update([b'\n']);
        }
        hex::encode(hasher.finalize())
    }
}

fn validate_item(item: &CatalogItem) -> Result<()> {
    let invalid = |reason: &str| FinderError::InvalidItem {
        identifier: item.identifier.clone(),
        reason: reason.to_string(),
    };

    if item.identifier.trim().is_empty() {
        return Err(invalid("identifier must not be empty"));
    }
    if item.display_name.trim().is_empty() {
        return Err(invalid("display_name must not be empty"));
    }
    if item.description.trim().is_empty() {
        return Err(invalid("description must not be empty"));
    }
    if item.category.trim().is_empty() {
        return Err(invalid("category must not be empty"));
    }
    Ok(())
}

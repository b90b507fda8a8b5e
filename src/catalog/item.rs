use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One discoverable calculator.
///
/// Items are created once from a static definition and never mutated; the
/// [`CatalogIndex`](super::CatalogIndex) owns its copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable unique identifier (usually the page slug)
    #[serde(alias = "slug", alias = "id")]
    pub identifier: String,
    /// Human-readable name
    #[serde(alias = "name")]
    pub display_name: String,
    /// One or two sentences summarizing purpose
    pub description: String,
    /// Parent grouping identifier
    pub category: String,
    /// Optional synonyms and aliases
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub keywords: BTreeSet<String>,
}

impl CatalogItem {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            description: description.into(),
            category: category.into(),
            keywords: BTreeSet::new(),
        }
    }

    /// Builder: add keywords
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Keywords joined with single spaces, in sorted order.
    pub fn keyword_text(&self) -> String {
        self.keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

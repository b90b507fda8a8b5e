//! Lexical scorer
//!
//! Deterministic, explainable baseline. For every item, each query token
//! (duplicates included) contributes:
//!
//! ```text
//! keyword_weight      token is one of the item's keyword tokens   (3)
//! name_weight         token is one of the display-name tokens     (2)
//! description_weight  token is one of the description tokens      (1)
//! near-miss bonus     no exact hit: fuzzy_weight * (1 - d/maxLen) (0.5)
//! ```
//!
//! Field contributions add up. The near-miss bonus uses the closest item
//! token within `fuzzy_max_distance` edits, capped at that token's field
//! weight. The raw sum is divided by `sqrt(n)`, where `n` is the size of the
//! item's full token set (name + description + keywords).
//!
//! Adding a query token to an item's keywords raises its raw score by at
//! least `keyword_weight` but can grow `n` by one. The score still rises
//! unless the raw score already exceeds roughly `6n`, which takes a query
//! repeating the same matched word many times.

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::{CatalogIndex, IndexedItem};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::resolve::fuzzy::NearMisses;
use crate::resolve::query::Query;
use crate::resolve::ranking;
use crate::resolve::{ResolutionResult, Scorer, Strategy};

/// Per-item score decomposition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub identifier: String,
    pub keyword: f64,
    pub name: f64,
    pub description: f64,
    pub fuzzy: f64,
    /// Sum of the four contributions
    pub raw: f64,
    /// `raw / sqrt(max(1, token_count))`
    pub normalized: f64,
    /// Size of the full token set (name + description + keywords)
    pub token_count: usize,
    pub name_token_count: usize,
}

/// The mandatory scorer. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub const fn new() -> Self {
        Self
    }

    /// Resolve an already-parsed query.
    pub fn resolve_query(
        &self,
        query: &Query,
        index: &CatalogIndex,
        config: &ResolverConfig,
    ) -> ResolutionResult {
        if query.is_empty() || index.is_empty() {
            return ResolutionResult::empty(Strategy::Lexical);
        }

        let ranked = ranked_scores(query, index, config);
        let result = ranking::select(&ranked, config);
        tracing::debug!(
            tokens = query.token_count(),
            candidates = ranked.iter().filter(|s| s.normalized > 0.0).count(),
            identifier = result.identifier.as_deref().unwrap_or("-"),
            confidence = result.confidence,
            "lexical resolution"
        );
        result
    }
}

impl Scorer for LexicalScorer {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn score(
        &self,
        query: &Query,
        index: &CatalogIndex,
        config: &ResolverConfig,
    ) -> Result<ResolutionResult> {
        Ok(self.resolve_query(query, index, config))
    }
}

/// Resolve a raw query with the lexical scorer.
///
/// Pure function of its arguments: identical inputs give identical results.
pub fn resolve(query: &str, index: &CatalogIndex, config: &ResolverConfig) -> ResolutionResult {
    let query = Query::parse(query, config.max_query_chars);
    LexicalScorer::new().resolve_query(&query, index, config)
}

/// Score breakdowns for every item with a positive score, in ranking order.
pub fn explain(query: &str, index: &CatalogIndex, config: &ResolverConfig) -> Vec<ScoreBreakdown> {
    let query = Query::parse(query, config.max_query_chars);
    if query.is_empty() {
        return Vec::new();
    }
    let mut ranked = ranked_scores(&query, index, config);
    ranked.retain(|s| s.normalized > 0.0);
    ranked
}

/// Score every item and sort in ranking order.
fn ranked_scores(query: &Query, index: &CatalogIndex, config: &ResolverConfig) -> Vec<ScoreBreakdown> {
    let near = NearMisses::compute(query.tokens(), index, config);
    let entries: Vec<&IndexedItem> = index.entries().collect();
    let mut scores: Vec<ScoreBreakdown> = entries
        .par_iter()
        .map(|entry| score_item(query, entry, &near, config))
        .collect();
    ranking::rank(&mut scores, query.token_count());
    scores
}

/// Score a single item against a query.
pub fn score_item(
    query: &Query,
    entry: &IndexedItem,
    near: &NearMisses,
    config: &ResolverConfig,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown {
        identifier: entry.identifier().to_string(),
        token_count: entry.token_count(),
        name_token_count: entry.name_token_count(),
        ..ScoreBreakdown::default()
    };

    for token in query.tokens() {
        let token = token.as_str();
        let mut exact = false;
        if entry.keyword_tokens().contains(token) {
            breakdown.keyword += config.keyword_weight;
            exact = true;
        }
        if entry.name_tokens().contains(token) {
            breakdown.name += config.name_weight;
            exact = true;
        }
        if entry.description_tokens().contains(token) {
            breakdown.description += config.description_weight;
            exact = true;
        }
        if !exact {
            breakdown.fuzzy += near_miss_bonus(token, entry, near, config);
        }
    }

    breakdown.raw = breakdown.keyword + breakdown.name + breakdown.description + breakdown.fuzzy;
    #[allow(clippy::cast_precision_loss)]
    let norm = (entry.token_count().max(1) as f64).sqrt();
    breakdown.normalized = breakdown.raw / norm;
    breakdown
}

fn near_miss_bonus(token: &str, entry: &IndexedItem, near: &NearMisses, config: &ResolverConfig) -> f64 {
    let Some(candidates) = near.get(token) else {
        return 0.0;
    };
    candidates
        .iter()
        .filter_map(|candidate| {
            let cap = field_weight(&candidate.token, entry, config)?;
            Some(candidate.bonus(config.fuzzy_weight).min(cap))
        })
        .fold(0.0, f64::max)
}

/// Highest weight among the fields containing `token`.
fn field_weight(token: &str, entry: &IndexedItem, config: &ResolverConfig) -> Option<f64> {
    let mut weight: Option<f64> = None;
    for (set, w) in [
        (entry.keyword_tokens(), config.keyword_weight),
        (entry.name_tokens(), config.name_weight),
        (entry.description_tokens(), config.description_weight),
    ] {
        if set.contains(token) {
            weight = Some(weight.map_or(w, |current| current.max(w)));
        }
    }
    weight
}

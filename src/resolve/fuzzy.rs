//! Near-miss token matching.
//!
//! Plurals and typos ("mortgages", "morgage") still land on the right item
//! without a semantic model. Candidates are found once per query against the
//! catalog vocabulary; per-item scoring then only checks membership.

use std::collections::BTreeMap;

use crate::catalog::CatalogIndex;
use crate::config::ResolverConfig;

/// A vocabulary token close to a query token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearToken {
    pub token: String,
    pub distance: usize,
    /// Character length of the longer of the two tokens
    pub max_len: usize,
}

impl NearToken {
    /// `weight * (1 - distance / max_len)`
    pub fn bonus(&self, weight: f64) -> f64 {
        if self.max_len == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.distance as f64 / self.max_len as f64;
        weight * (1.0 - ratio)
    }
}

/// Near-miss candidates keyed by query token.
#[derive(Debug, Clone, Default)]
pub struct NearMisses {
    by_token: BTreeMap<String, Vec<NearToken>>,
}

impl NearMisses {
    /// Compare every distinct query token against the index vocabulary.
    pub fn compute(tokens: &[String], index: &CatalogIndex, config: &ResolverConfig) -> Self {
        let mut by_token = BTreeMap::new();
        if config.fuzzy_max_distance == 0 || config.fuzzy_weight <= 0.0 {
            return Self { by_token };
        }

        for token in tokens {
            if by_token.contains_key(token) {
                continue;
            }
            let len = token.chars().count();
            if len < config.fuzzy_min_token_len {
                continue;
            }
            let near: Vec<NearToken> = index
                .vocabulary()
                .filter_map(|candidate| near_token(token, len, candidate, config.fuzzy_max_distance))
                .collect();
            if !near.is_empty() {
                by_token.insert(token.clone(), near);
            }
        }

        Self { by_token }
    }

    pub fn get(&self, token: &str) -> Option<&[NearToken]> {
        self.by_token.get(token).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

fn near_token(token: &str, len: usize, candidate: &str, max_distance: usize) -> Option<NearToken> {
    if candidate == token {
        return None;
    }
    let candidate_len = candidate.chars().count();
    if len.abs_diff(candidate_len) > max_distance {
        return None;
    }
    let distance = strsim::levenshtein(token, candidate);
    (distance <= max_distance).then(|| NearToken {
        token: candidate.to_string(),
        distance,
        max_len: len.max(candidate_len),
    })
}

//! Ranking order and the confidence policy.
//!
//! Order: normalized score descending, then the item whose display-name
//! token count is closest to the query token count, then identifier
//! ascending. The order is total, so equal inputs always rank equally.

use std::cmp::Ordering;

use crate::config::ResolverConfig;
use crate::resolve::lexical::ScoreBreakdown;
use crate::resolve::{Alternate, ResolutionResult, Strategy};

/// Total ranking order for a query with `query_token_count` tokens.
///
/// Both the name and the query token counts include repeated tokens.
pub fn compare(a: &ScoreBreakdown, b: &ScoreBreakdown, query_token_count: usize) -> Ordering {
    b.normalized
        .total_cmp(&a.normalized)
        .then_with(|| {
            let pa = a.name_token_count.abs_diff(query_token_count);
            let pb = b.name_token_count.abs_diff(query_token_count);
            pa.cmp(&pb)
        })
        .then_with(|| a.identifier.cmp(&b.identifier))
}

/// Sort breakdowns in ranking order.
pub fn rank(scores: &mut [ScoreBreakdown], query_token_count: usize) {
    scores.sort_by(|a, b| compare(a, b, query_token_count));
}

/// Apply the threshold and cut alternates from a ranked list.
///
/// Only items with a positive score are ever reported. With a match, the
/// alternates are the next K-1 items; without one, the top K.
pub fn select(ranked: &[ScoreBreakdown], config: &ResolverConfig) -> ResolutionResult {
    let k = config.max_results.max(1);
    let mut positive = ranked.iter().filter(|s| s.normalized > 0.0);

    let Some(top) = positive.next() else {
        return ResolutionResult::empty(Strategy::Lexical);
    };

    if top.normalized < config.min_confidence {
        let alternates = std::iter::once(top)
            .chain(positive)
            .take(k)
            .map(to_alternate)
            .collect();
        return ResolutionResult {
            identifier: None,
            confidence: top.normalized,
            alternates,
            strategy: Strategy::Lexical,
        };
    }

    ResolutionResult {
        identifier: Some(top.identifier.clone()),
        confidence: top.normalized,
        alternates: positive.take(k - 1).map(to_alternate).collect(),
        strategy: Strategy::Lexical,
    }
}

fn to_alternate(score: &ScoreBreakdown) -> Alternate {
    Alternate {
        identifier: score.identifier.clone(),
        score: score.normalized,
    }
}

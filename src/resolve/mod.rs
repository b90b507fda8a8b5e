//! Query resolution
//!
//! Turns one free-text request into a ranked choice among catalog items.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                 Query (truncated, tokenized)                   │
//! └────────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │    SemanticScorer (opt.)     │  │       LexicalScorer          │
//! │  (HTTP, timeout, 1 retry)    │  │ (field weights + near-miss)  │
//! └──────────────────────────────┘  └──────────────────────────────┘
//!                     │                          │
//!                     └──────────┬───────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │   Resolver (hybrid.rs)        │
//!                │ validate semantic, else lexical│
//!                └───────────────────────────────┘
//!                                │
//!                                ▼
//!              ResolutionResult {identifier, confidence, alternates}
//! ```
//!
//! The lexical scorer is the correctness baseline: it cannot fail, and any
//! semantic failure (timeout, bad payload, unknown identifier) degrades to it.

pub mod fuzzy;
pub mod hybrid;
pub mod lexical;
pub mod query;
pub mod ranking;
pub mod semantic;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogIndex;
use crate::config::ResolverConfig;
use crate::error::Result;

pub use hybrid::Resolver;
pub use lexical::{LexicalScorer, ScoreBreakdown, explain, resolve};
pub use query::Query;
pub use semantic::SemanticScorer;

/// Which scorer produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Lexical,
    Semantic,
}

impl Strategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Semantic => "semantic",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A runner-up match for fallback UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternate {
    pub identifier: String,
    pub score: f64,
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Chosen calculator, `None` when nothing cleared the threshold
    pub identifier: Option<String>,
    /// Score of the top candidate (not a probability)
    pub confidence: f64,
    /// Ranked runner-ups, at most K entries
    pub alternates: Vec<Alternate>,
    pub strategy: Strategy,
}

impl ResolutionResult {
    /// A result with no identifier and no alternates
    pub const fn empty(strategy: Strategy) -> Self {
        Self {
            identifier: None,
            confidence: 0.0,
            alternates: Vec::new(),
            strategy,
        }
    }

    pub const fn is_match(&self) -> bool {
        self.identifier.is_some()
    }
}

/// Pluggable scoring strategy.
///
/// Implemented by [`LexicalScorer`] (always available, infallible) and
/// [`SemanticScorer`] (external, may fail). Results from anything other than
/// the lexical scorer are validated by [`Resolver`] before use.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(
        &self,
        query: &Query,
        index: &CatalogIndex,
        config: &ResolverConfig,
    ) -> Result<ResolutionResult>;
}

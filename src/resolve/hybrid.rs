//! Resolver: optional semantic first pass over the lexical baseline.
//!
//! A semantic answer is used only when it names an identifier from the
//! current snapshot, every alternate is known too, and the confidence is a
//! finite number. Anything else (including "no identifier") is logged and the
//! lexical scorer answers instead. Callers never see scorer errors.

use crate::catalog::CatalogIndex;
use crate::config::{Config, ResolverConfig};
use crate::error::{FinderError, Result};
use crate::resolve::lexical::LexicalScorer;
use crate::resolve::query::Query;
use crate::resolve::semantic::SemanticScorer;
use crate::resolve::{ResolutionResult, Scorer};

pub struct Resolver {
    config: ResolverConfig,
    lexical: LexicalScorer,
    semantic: Option<Box<dyn Scorer>>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("semantic", &self.semantic.as_ref().map(|s| s.name()))
            .finish_non_exhaustive()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    /// Lexical-only resolver.
    pub const fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            lexical: LexicalScorer::new(),
            semantic: None,
        }
    }

    /// Build from full config, adding the semantic scorer when enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let resolver = Self::new(config.resolver.clone());
        if !config.semantic.enabled {
            return Ok(resolver);
        }
        Ok(resolver.with_semantic(SemanticScorer::from_config(&config.semantic)?))
    }

    /// Layer a semantic scorer on top of the lexical baseline.
    #[must_use]
    pub fn with_semantic(mut self, scorer: impl Scorer + 'static) -> Self {
        self.semantic = Some(Box::new(scorer));
        self
    }

    /// Drop the semantic layer.
    #[must_use]
    pub fn lexical_only(mut self) -> Self {
        self.semantic = None;
        self
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub const fn has_semantic(&self) -> bool {
        self.semantic.is_some()
    }

    /// Resolve one query against a snapshot. Never fails.
    pub fn resolve(&self, query: &str, index: &CatalogIndex) -> ResolutionResult {
        let query = Query::parse(query, self.config.max_query_chars);
        if query.was_truncated() {
            tracing::debug!(max_chars = self.config.max_query_chars, "query truncated");
        }
        if query.is_empty() || index.is_empty() {
            return self.lexical.resolve_query(&query, index, &self.config);
        }

        if let Some(semantic) = &self.semantic {
            match semantic
                .score(&query, index, &self.config)
                .and_then(|result| accept_semantic(result, index, &self.config))
            {
                Ok(result) => {
                    tracing::debug!(
                        scorer = semantic.name(),
                        identifier = result.identifier.as_deref().unwrap_or("-"),
                        confidence = result.confidence,
                        "semantic resolution"
                    );
                    return result;
                }
                Err(err) => {
                    tracing::warn!(
                        scorer = semantic.name(),
                        error = %err,
                        "semantic scorer failed; falling back to lexical"
                    );
                }
            }
        }

        self.lexical.resolve_query(&query, index, &self.config)
    }
}

/// Validate a result from a non-lexical scorer against the snapshot.
fn accept_semantic(
    mut result: ResolutionResult,
    index: &CatalogIndex,
    config: &ResolverConfig,
) -> Result<ResolutionResult> {
    let Some(identifier) = result.identifier.as_deref() else {
        return Err(FinderError::Semantic("response named no identifier".to_string()));
    };
    if !index.contains(identifier) {
        return Err(FinderError::Semantic(format!(
            "unknown identifier '{identifier}'"
        )));
    }
    if !result.confidence.is_finite() {
        return Err(FinderError::Semantic(format!(
            "non-finite confidence {}",
            result.confidence
        )));
    }
    if let Some(unknown) = result
        .alternates
        .iter()
        .find(|alt| !index.contains(&alt.identifier) || !alt.score.is_finite())
    {
        return Err(FinderError::Semantic(format!(
            "invalid alternate '{}'",
            unknown.identifier
        )));
    }

    let chosen = identifier.to_string();
    result.alternates.retain(|alt| alt.identifier != chosen);
    result
        .alternates
        .truncate(config.max_results.max(1).saturating_sub(1));
    Ok(result)
}

//! External semantic scorer.
//!
//! Sends the query and the catalog candidates to an HTTP endpoint (an
//! embedding service or hosted language model behind a small adapter) and
//! reads back a ranked answer:
//!
//! ```text
//! POST {endpoint}
//! { "query": "...", "limit": 5,
//!   "candidates": [{ "identifier", "display_name", "description", "category", "keywords" }] }
//!
//! 200 OK
//! { "identifier": "bmi-calculator" | null, "confidence": 0.93,
//!   "alternates": [{ "identifier": "...", "score": 0.41 }] }
//! ```
//!
//! Every request carries the configured timeout. Transport errors and non-2xx
//! statuses are retried at most once; malformed bodies are not retried. This
//! scorer does not check identifiers against the catalog, the
//! [`Resolver`](super::Resolver) does.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogIndex;
use crate::config::{ResolverConfig, SemanticConfig};
use crate::error::{FinderError, Result};
use crate::resolve::query::Query;
use crate::resolve::{Alternate, ResolutionResult, Scorer, Strategy};

#[derive(Debug, Serialize)]
struct SemanticRequest<'a> {
    query: &'a str,
    limit: usize,
    candidates: Vec<Candidate<'a>>,
}

#[derive(Debug, Serialize)]
struct Candidate<'a> {
    identifier: &'a str,
    display_name: &'a str,
    description: &'a str,
    category: &'a str,
    keywords: &'a BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct SemanticResponse {
    identifier: Option<String>,
    confidence: f64,
    #[serde(default)]
    alternates: Vec<Alternate>,
}

pub struct SemanticScorer {
    endpoint: String,
    client: reqwest::blocking::Client,
    max_retries: u32,
    api_key: Option<String>,
}

impl std::fmt::Debug for SemanticScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticScorer")
            .field("endpoint", &self.endpoint)
            .field("max_retries", &self.max_retries)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl SemanticScorer {
    /// Build a scorer from config; fails when disabled or misconfigured.
    pub fn from_config(config: &SemanticConfig) -> Result<Self> {
        if !config.enabled {
            return Err(FinderError::Config(
                "semantic scorer is disabled (semantic.enabled=false)".to_string(),
            ));
        }
        let endpoint = config.endpoint.trim();
        if endpoint.is_empty() {
            return Err(FinderError::Config(
                "semantic.endpoint must not be empty".to_string(),
            ));
        }
        if config.timeout.is_zero() {
            return Err(FinderError::Config(
                "semantic.timeout must be greater than 0".to_string(),
            ));
        }
        if endpoint.starts_with("http://") {
            tracing::debug!("semantic endpoint uses unencrypted HTTP");
        }

        let api_key = match &config.api_key_env {
            Some(var) => {
                let key = std::env::var(var).ok().filter(|key| !key.trim().is_empty());
                if key.is_none() {
                    tracing::warn!(var = %var, "semantic api key variable is unset; sending no token");
                }
                key
            }
            None => None,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| FinderError::Config(format!("semantic http client: {err}")))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
            max_retries: config.max_retries.min(1),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, body: &SemanticRequest<'_>) -> Result<reqwest::blocking::Response> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|err| {
            if err.is_timeout() {
                FinderError::Timeout(format!("semantic scorer: {err}"))
            } else {
                FinderError::Semantic(format!("request failed: {err}"))
            }
        })?;

        if !response.status().is_success() {
            return Err(FinderError::Semantic(format!("HTTP {}", response.status())));
        }
        Ok(response)
    }

    fn send_with_retry(&self, body: &SemanticRequest<'_>) -> Result<reqwest::blocking::Response> {
        let attempts = 1 + self.max_retries;
        let mut attempt = 1;
        loop {
            match self.send(body) {
                Ok(response) => return Ok(response),
                Err(err) if attempt < attempts => {
                    tracing::debug!(attempt, error = %err, "semantic request failed; retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Scorer for SemanticScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    fn score(
        &self,
        query: &Query,
        index: &CatalogIndex,
        config: &ResolverConfig,
    ) -> Result<ResolutionResult> {
        let body = SemanticRequest {
            query: query.text(),
            limit: config.max_results.max(1),
            candidates: index
                .entries()
                .map(|entry| {
                    let item = entry.item();
                    Candidate {
                        identifier: &item.identifier,
                        display_name: &item.display_name,
                        description: &item.description,
                        category: &item.category,
                        keywords: &item.keywords,
                    }
                })
                .collect(),
        };

        let response: SemanticResponse = self
            .send_with_retry(&body)?
            .json()
            .map_err(|err| FinderError::Semantic(format!("malformed response: {err}")))?;

        Ok(ResolutionResult {
            identifier: response.identifier,
            confidence: response.confidence,
            alternates: response.alternates,
            strategy: Strategy::Semantic,
        })
    }
}

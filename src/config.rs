use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
}

impl Config {
    /// Load layered configuration.
    ///
    /// An explicit path (or `CALCFIND_CONFIG`) replaces the global/project
    /// lookup. Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CALCFIND_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(FinderError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Parse a config file without env overrides or layering.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| FinderError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("calcfind/config.toml"))
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&project_root.join("calcfind.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| FinderError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| FinderError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.catalog {
            self.catalog.merge(patch);
        }
        if let Some(patch) = patch.resolver {
            self.resolver.merge(patch);
        }
        if let Some(patch) = patch.semantic {
            self.semantic.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CALCFIND_*` overrides from an arbitrary lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CALCFIND_CATALOG") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        if let Some(value) = parse_value::<f64>(&lookup, "CALCFIND_MIN_CONFIDENCE")? {
            self.resolver.min_confidence = value;
        }
        if let Some(value) = parse_value::<usize>(&lookup, "CALCFIND_MAX_RESULTS")? {
            self.resolver.max_results = value;
        }
        if let Some(value) = parse_value::<usize>(&lookup, "CALCFIND_MAX_QUERY_CHARS")? {
            self.resolver.max_query_chars = value;
        }

        if let Some(value) = lookup("CALCFIND_SEMANTIC_ENABLED") {
            self.semantic.enabled = parse_bool(&value);
        }
        if let Some(value) = lookup("CALCFIND_SEMANTIC_ENDPOINT") {
            self.semantic.endpoint = value;
        }
        if let Some(value) = parse_value::<u64>(&lookup, "CALCFIND_SEMANTIC_TIMEOUT_MS")? {
            self.semantic.timeout = Duration::from_millis(value);
        }
        if let Some(value) = parse_value::<u32>(&lookup, "CALCFIND_SEMANTIC_MAX_RETRIES")? {
            self.semantic.max_retries = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog snapshot file (json, yaml or toml)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    fn merge(&mut self, patch: CatalogPatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
    }
}

/// Weights and thresholds for lexical resolution.
///
/// The weights are tunable; defaults give keyword hits the most pull, then
/// name hits, then description hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Top scores below this yield no identifier; a zero score never matches
    #[serde(default)]
    pub min_confidence: f64,
    /// K: the top match plus alternates, at most
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Queries are truncated to this many characters
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,
    #[serde(default = "default_description_weight")]
    pub description_weight: f64,
    #[serde(default = "default_fuzzy_weight")]
    pub fuzzy_weight: f64,
    #[serde(default = "default_fuzzy_max_distance")]
    pub fuzzy_max_distance: usize,
    /// Shorter query tokens never take part in near-miss matching
    #[serde(default = "default_fuzzy_min_token_len")]
    pub fuzzy_min_token_len: usize,
}

const fn default_max_results() -> usize {
    5
}

const fn default_max_query_chars() -> usize {
    512
}

const fn default_keyword_weight() -> f64 {
    3.0
}

const fn default_name_weight() -> f64 {
    2.0
}

const fn default_description_weight() -> f64 {
    1.0
}

const fn default_fuzzy_weight() -> f64 {
    0.5
}

const fn default_fuzzy_max_distance() -> usize {
    2
}

const fn default_fuzzy_min_token_len() -> usize {
    3
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            max_results: default_max_results(),
            max_query_chars: default_max_query_chars(),
            keyword_weight: default_keyword_weight(),
            name_weight: default_name_weight(),
            description_weight: default_description_weight(),
            fuzzy_weight: default_fuzzy_weight(),
            fuzzy_max_distance: default_fuzzy_max_distance(),
            fuzzy_min_token_len: default_fuzzy_min_token_len(),
        }
    }
}

impl ResolverConfig {
    /// Builder: set the confidence threshold
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Builder: set K
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn merge(&mut self, patch: ResolverPatch) {
        if let Some(value) = patch.min_confidence {
            self.min_confidence = value;
        }
        if let Some(value) = patch.max_results {
            self.max_results = value;
        }
        if let Some(value) = patch.max_query_chars {
            self.max_query_chars = value;
        }
        if let Some(value) = patch.keyword_weight {
            self.keyword_weight = value;
        }
        if let Some(value) = patch.name_weight {
            self.name_weight = value;
        }
        if let Some(value) = patch.description_weight {
            self.description_weight = value;
        }
        if let Some(value) = patch.fuzzy_weight {
            self.fuzzy_weight = value;
        }
        if let Some(value) = patch.fuzzy_max_distance {
            self.fuzzy_max_distance = value;
        }
        if let Some(value) = patch.fuzzy_min_token_len {
            self.fuzzy_min_token_len = value;
        }
    }
}

/// Optional external scorer reached over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: String,
    /// Per-request timeout, e.g. "1500ms" or "2s"
    #[serde(default = "default_semantic_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    /// Extra attempts after a failed request; values above 1 are clamped
    #[serde(default = "default_semantic_retries")]
    pub max_retries: u32,
    /// Name of the environment variable holding a bearer token
    #[serde(default)]
    pub api_key_env: Option<String>,
}

const fn default_semantic_timeout() -> Duration {
    Duration::from_secs(2)
}

const fn default_semantic_retries() -> u32 {
    1
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            timeout: default_semantic_timeout(),
            max_retries: default_semantic_retries(),
            api_key_env: None,
        }
    }
}

impl SemanticConfig {
    fn merge(&mut self, patch: SemanticPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
        if let Some(value) = patch.timeout {
            self.timeout = value;
        }
        if let Some(value) = patch.max_retries {
            self.max_retries = value;
        }
        if let Some(value) = patch.api_key_env {
            self.api_key_env = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub catalog: Option<CatalogPatch>,
    pub resolver: Option<ResolverPatch>,
    pub semantic: Option<SemanticPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogPatch {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ResolverPatch {
    pub min_confidence: Option<f64>,
    pub max_results: Option<usize>,
    pub max_query_chars: Option<usize>,
    pub keyword_weight: Option<f64>,
    pub name_weight: Option<f64>,
    pub description_weight: Option<f64>,
    pub fuzzy_weight: Option<f64>,
    pub fuzzy_max_distance: Option<usize>,
    pub fuzzy_min_token_len: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SemanticPatch {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
    pub api_key_env: Option<String>,
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_value<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|err| FinderError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

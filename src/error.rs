use std::io;

use thiserror::Error;

/// Main error type for calcfind operations.
///
/// Resolution itself never produces one of these: "no match" is a normal
/// [`ResolutionResult`](crate::resolve::ResolutionResult), and external scorer
/// failures are degraded to the lexical scorer before they reach a caller.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Duplicate catalog identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Invalid catalog item '{identifier}': {reason}")]
    InvalidItem { identifier: String, reason: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Semantic scorer error: {0}")]
    Semantic(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FinderError {
    /// Whether this error comes from building a catalog index.
    ///
    /// Construction errors block an index swap; everything else is either a
    /// boundary problem (files, config) or an internal scorer failure.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier(_) | Self::InvalidItem { .. })
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;

//! Catalog snapshot files.
//!
//! Boundary adapter for the CLI and embedding applications; the index and
//! resolver never read files themselves. Accepted shapes:
//!
//! ```text
//! JSON / YAML:  [ {item}, ... ]   or   { "items": [ {item}, ... ] }
//! TOML:         [[items]] tables
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::catalog::item::CatalogItem;
use crate::error::{FinderError, Result};

/// On-disk catalog format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    Toml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(FinderError::Catalog(format!(
                "unsupported catalog extension '{other}' for {} (expected json, yaml or toml)",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Items(Vec<CatalogItem>),
    Wrapped { items: Vec<CatalogItem> },
}

impl CatalogDocument {
    fn into_items(self) -> Vec<CatalogItem> {
        match self {
            Self::Items(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Read a catalog snapshot from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let format = CatalogFormat::from_path(path)?;
    let raw = std::fs::read_to_string(path)
        .map_err(|err| FinderError::Catalog(format!("read catalog {}: {err}", path.display())))?;
    let items = parse_catalog(&raw, format)
        .map_err(|err| FinderError::Catalog(format!("parse catalog {}: {err}", path.display())))?;
    tracing::debug!(path = %path.display(), items = items.len(), "loaded catalog file");
    Ok(items)
}

/// Parse a catalog snapshot from an in-memory string.
pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<Vec<CatalogItem>> {
    let document: CatalogDocument = match format {
        CatalogFormat::Json => serde_json::from_str(raw)?,
        CatalogFormat::Yaml => serde_yaml::from_str(raw)?,
        CatalogFormat::Toml => {
            toml::from_str(raw).map_err(|err| FinderError::Catalog(err.to_string()))?
        }
    };
    Ok(document.into_items())
}

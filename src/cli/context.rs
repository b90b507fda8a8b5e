//! Per-invocation state shared by command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{CatalogHandle, CatalogIndex, load_catalog};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{FinderError, Result};

pub struct AppContext {
    pub config: Config,
    pub catalog_path: PathBuf,
    pub catalog: CatalogHandle,
    pub machine: bool,
}

impl AppContext {
    /// Load config and build the catalog index named by flags or config.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &cwd)?;
        let catalog_path = catalog_path(cli.catalog.as_deref(), &config)?;

        let items = load_catalog(&catalog_path)?;
        let catalog = CatalogHandle::from_items(items)?;
        tracing::debug!(
            path = %catalog_path.display(),
            items = catalog.snapshot().len(),
            "catalog ready"
        );

        Ok(Self {
            config,
            catalog_path,
            catalog,
            machine: cli.machine,
        })
    }

    pub fn index(&self) -> Arc<CatalogIndex> {
        self.catalog.snapshot()
    }
}

fn catalog_path(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.catalog.path.clone())
        .ok_or_else(|| {
            FinderError::Config(
                "no catalog configured (pass --catalog, set CALCFIND_CATALOG or catalog.path)"
                    .to_string(),
            )
        })
}

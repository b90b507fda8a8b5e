//! calcfind - resolve free-text requests to catalog calculators
//!
//! A [`CatalogIndex`] is built once per catalog snapshot and shared through a
//! [`CatalogHandle`]; a [`Resolver`] maps each query to a [`ResolutionResult`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod resolve;
pub mod test_utils;

pub use catalog::{CatalogHandle, CatalogIndex, CatalogItem};
pub use config::{Config, ResolverConfig, SemanticConfig};
pub use error::{FinderError, Result};
pub use resolve::{Alternate, ResolutionResult, Resolver, Strategy, resolve};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

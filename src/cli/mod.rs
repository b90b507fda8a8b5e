//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod context;

pub use context::AppContext;

/// calcfind - resolve free-text requests to the best-matching calculator
#[derive(Parser, Debug)]
#[command(name = "calcfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/calcfind/config.toml, then ./calcfind.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog snapshot (json, yaml or toml); overrides catalog.path
    #[arg(long, global = true, env = "CALCFIND_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a query to the best-matching calculator
    Resolve(commands::resolve::ResolveArgs),

    /// Show the index tokens of one calculator
    Tokens(commands::tokens::TokensArgs),

    /// List catalog identifiers by category
    List(commands::list::ListArgs),

    /// Validate the catalog and print its fingerprint
    Check(commands::check::CheckArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

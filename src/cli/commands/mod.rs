//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::cli::{AppContext, Commands};
use crate::error::Result;

pub mod check;
pub mod completions;
pub mod list;
pub mod resolve;
pub mod tokens;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Resolve(args) => resolve::run(ctx, args),
        Commands::Tokens(args) => tokens::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
        Commands::Completions(args) => completions::run(args),
    }
}

/// Truncate to at most `max_chars` characters, adding "..." when cut.
pub(crate) fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

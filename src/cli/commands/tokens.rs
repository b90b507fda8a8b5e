//! calcfind tokens - Show the index tokens of one calculator

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::error::{FinderError, Result};

#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Calculator identifier
    pub identifier: String,
}

pub fn run(ctx: &AppContext, args: &TokensArgs) -> Result<()> {
    let index = ctx.index();
    let Some(entry) = index.entry(&args.identifier) else {
        return Err(FinderError::Catalog(format!(
            "unknown identifier '{}'",
            args.identifier
        )));
    };

    if ctx.machine {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "identifier": entry.identifier(),
                "tokens": entry.tokens(),
                "keyword_tokens": entry.keyword_tokens(),
                "name_tokens": entry.name_tokens(),
                "description_tokens": entry.description_tokens(),
            })
        );
        return Ok(());
    }

    println!("{} ({} tokens)", entry.identifier().bold(), entry.token_count());
    for (label, set) in [
        ("keywords", entry.keyword_tokens()),
        ("name", entry.name_tokens()),
        ("description", entry.description_tokens()),
    ] {
        let joined = set.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
        println!("  {:<12} {}", label.dimmed(), joined);
    }
    Ok(())
}

//! calcfind resolve - Resolve a query to one calculator
//!
//! Runs the configured resolver (semantic first pass when enabled, lexical
//! otherwise) and prints the choice, its confidence and the alternates.

use clap::Args;
use colored::Colorize;

use crate::catalog::CatalogIndex;
use crate::cli::AppContext;
use crate::cli::commands::truncate_str;
use crate::error::Result;
use crate::resolve::{ResolutionResult, Resolver, ScoreBreakdown, explain};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Free-text request, e.g. "convert psi to bar"
    pub query: String,

    /// K: top match plus alternates (default from config)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Confidence threshold (default from config)
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Skip the semantic scorer even when configured
    #[arg(long)]
    pub lexical_only: bool,

    /// Show the lexical score breakdown for ranked items
    #[arg(long)]
    pub explain: bool,
}

pub fn run(ctx: &AppContext, args: &ResolveArgs) -> Result<()> {
    let mut config = ctx.config.clone();
    if let Some(limit) = args.limit {
        config.resolver.max_results = limit;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.resolver.min_confidence = min_confidence;
    }
    if args.lexical_only {
        config.semantic.enabled = false;
    }

    let resolver = Resolver::from_config(&config)?;
    let index = ctx.index();
    let result = resolver.resolve(&args.query, &index);
    let breakdown = if args.explain {
        let mut rows = explain(&args.query, &index, resolver.config());
        rows.truncate(resolver.config().max_results.max(1));
        Some(rows)
    } else {
        None
    };

    if ctx.machine {
        let mut output = serde_json::json!({
            "status": "ok",
            "query": args.query,
            "result": result,
        });
        if let Some(rows) = &breakdown {
            output["explain"] = serde_json::to_value(rows)?;
        }
        println!("{output}");
        return Ok(());
    }

    display_result(&index, &args.query, &result);
    if let Some(rows) = &breakdown {
        display_breakdown(rows);
    }
    Ok(())
}

fn display_result(index: &CatalogIndex, query: &str, result: &ResolutionResult) {
    match &result.identifier {
        Some(id) => {
            let name = index.item(id).map_or(id.as_str(), |item| item.display_name.as_str());
            println!(
                "{} {} {}",
                "→".green(),
                name.bold(),
                format!("({id})").dimmed()
            );
            println!(
                "  confidence {:.3} via {}",
                result.confidence,
                result.strategy.to_string().cyan()
            );
            if let Some(item) = index.item(id) {
                println!("  {}", truncate_str(&item.description, 77).dimmed());
            }
        }
        None => {
            println!("{} No confident match for '{}'", "!".yellow(), query.cyan());
        }
    }

    if result.alternates.is_empty() {
        return;
    }
    println!();
    println!("{}", "Alternates:".bold());
    for (i, alt) in result.alternates.iter().enumerate() {
        let rank = format!("{}.", i + 1);
        println!("{:4} {} (score: {:.3})", rank.dimmed(), alt.identifier, alt.score);
    }
}

fn display_breakdown(rows: &[ScoreBreakdown]) {
    println!();
    println!("{}", "Lexical breakdown:".bold());
    println!(
        "  {:<32} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}",
        "identifier", "keyword", "name", "desc", "fuzzy", "raw", "score"
    );
    for row in rows {
        println!(
            "  {:<32} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>8.3}",
            truncate_str(&row.identifier, 29),
            row.keyword,
            row.name,
            row.description,
            row.fuzzy,
            row.raw,
            row.normalized
        );
    }
}

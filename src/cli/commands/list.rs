//! calcfind list - List catalog identifiers by category

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this category
    #[arg(long, short)]
    pub category: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let index = ctx.index();
    let mut categories = index.categories();
    if let Some(wanted) = &args.category {
        categories.retain(|category, _| *category == wanted.as_str());
    }

    if ctx.machine {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "count": categories.values().map(Vec::len).sum::<usize>(),
                "categories": categories,
            })
        );
        return Ok(());
    }

    if categories.is_empty() {
        println!("{} No calculators found", "!".yellow());
        return Ok(());
    }

    for (category, ids) in &categories {
        println!("{} ({})", category.bold(), ids.len());
        for id in ids {
            let name = index.item(id).map_or("", |item| item.display_name.as_str());
            println!("  {:<36} {}", id, name.dimmed());
        }
    }
    Ok(())
}

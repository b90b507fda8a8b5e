//! calcfind check - Validate the catalog
//!
//! Loading the context already builds the index, so reaching this handler
//! means the catalog passed validation.

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {}

pub fn run(ctx: &AppContext, _args: &CheckArgs) -> Result<()> {
    let index = ctx.index();
    let categories = index.categories().len();
    let vocabulary = index.vocabulary().count();
    let fingerprint = index.fingerprint();

    if ctx.machine {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "catalog": ctx.catalog_path.display().to_string(),
                "items": index.len(),
                "categories": categories,
                "vocabulary": vocabulary,
                "fingerprint": fingerprint,
            })
        );
        return Ok(());
    }

    println!(
        "{} {} is valid",
        "✓".green(),
        ctx.catalog_path.display().to_string().bold()
    );
    println!("  items        {}", index.len());
    println!("  categories   {categories}");
    println!("  vocabulary   {vocabulary}");
    println!("  fingerprint  {}", fingerprint.dimmed());
    Ok(())
}

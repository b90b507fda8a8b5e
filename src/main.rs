//! calcfind - resolve free-text requests to catalog calculators

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use calcfind::Result;
use calcfind::cli::{AppContext, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.plain || cli.machine {
        colored::control::set_override(false);
    }
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.machine {
                let error_json = serde_json::json!({
                    "status": "error",
                    "message": e.to_string(),
                });
                println!("{error_json}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Completions need neither config nor a catalog.
    if let Commands::Completions(args) = &cli.command {
        return calcfind::cli::commands::completions::run(args);
    }
    let ctx = AppContext::from_cli(cli)?;
    calcfind::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,calcfind=info",
        1 => "info,calcfind=debug",
        2 => "debug,calcfind=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.machine {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

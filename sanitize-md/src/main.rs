// sanitize-md/src/main.rs
//! sanitize-md entry point.
//!
//! Loads `.env`, initializes logging, and dispatches to the selected command.

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};
use sanitize_md::cli::{Cli, Commands};
use sanitize_md::commands::{check, rules, sanitize};
use sanitize_md::logger;

fn main() -> Result<()> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    let level_override = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level_override);
    info!("sanitize-md started. Version: {}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, args.quiet)?,
        Commands::Check(cmd) => {
            if check::run_check(cmd, args.quiet)? {
                std::process::exit(1);
            }
        }
        Commands::Rules(cmd) => rules::run_rules(cmd)?,
    }

    Ok(())
}

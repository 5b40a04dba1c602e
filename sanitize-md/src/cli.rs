// sanitize-md/src/cli.rs
//! This file defines the command-line interface (CLI) for the sanitize-md application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use sanitize_md_core::DEFAULT_DOCS_ROOT;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "sanitize-md",
    version = env!("CARGO_PKG_VERSION"),
    about = "Escape JSX-like markup in markdown docs before an MDX build",
    long_about = "sanitize-md walks a docs source tree and rewrites every .md file in place so that literal angle-bracket sequences such as <Foo>, <T>, <a=1> or <Widget x=\"y\" /> become inline code spans. MDX renderers would otherwise parse them as components. Files are only written when their content changes, and running the tool twice is a no-op.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress all log output on stderr.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging for sanitize-md crates (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites markdown files under the docs root in place.
    #[command(about = "Rewrite markdown files under the docs root in place.")]
    Sanitize(SanitizeCommand),

    /// Reports which files would change, without writing. Exits 1 if any would.
    #[command(about = "Report files that would be rewritten; exit 1 if any would change.")]
    Check(CheckCommand),

    /// Lists the active substitution rules in the order they are applied.
    #[command(about = "List the active substitution rules in application order.")]
    Rules(RulesCommand),
}

/// Where the docs live.
#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        env = "SANITIZE_MD_ROOT",
        default_value = DEFAULT_DOCS_ROOT,
        help = "Root directory of the markdown docs tree."
    )]
    pub root: PathBuf,
}

/// Which rules run.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Path to a YAML file with extra or overriding substitution rules.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom substitution rule file (YAML).")]
    pub config: Option<PathBuf>,

    /// Rule names to skip (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SanitizeCommand {
    #[command(flatten)]
    pub tree: TreeArgs,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Keep going after a file fails; the run still exits non-zero.
    #[arg(long = "keep-going", help = "Continue past unreadable or unwritable files instead of aborting.")]
    pub keep_going: bool,
}

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub tree: TreeArgs,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Print the report as JSON on stdout instead of one line per file.
    #[arg(long = "json-stdout", help = "Print the check report to stdout as JSON.")]
    pub json_stdout: bool,
}

#[derive(Args, Debug)]
pub struct RulesCommand {
    #[command(flatten)]
    pub rules: RuleArgs,
}

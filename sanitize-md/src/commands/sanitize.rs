// sanitize-md/src/commands/sanitize.rs
//! `sanitize`: rewrite the docs tree in place.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::info;
use sanitize_md_core::{sanitize_tree, TreeOptions};
use std::io::{self, Write};

use super::{build_engine, error_msg, warn_msg, LineReporter};
use crate::cli::SanitizeCommand;
use crate::ui::rule_summary;

pub fn run_sanitize(cmd: &SanitizeCommand, quiet: bool) -> Result<()> {
    info!("Starting sanitize operation on {}.", cmd.tree.root.display());

    let engine = build_engine(&cmd.rules)?;
    let options = TreeOptions {
        root: cmd.tree.root.clone(),
        dry_run: false,
        continue_on_error: cmd.keep_going,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Sanitizing markdown…")?;

    let mut reporter = LineReporter::new(stdout, "Sanitized:");
    let result = sanitize_tree(&options, &engine, &mut reporter);
    let mut stdout = reporter.finish().context("Failed to write to stdout")?;
    let report = result
        .with_context(|| format!("Failed to sanitize markdown under {}", options.root.display()))?;

    for failed in &report.failed {
        error_msg(format!("{}: {}", failed.path.display(), failed.error));
    }
    if report.has_failures() {
        bail!(
            "{} of {} markdown file(s) could not be sanitized",
            report.failed.len(),
            report.visited
        );
    }

    if report.visited == 0 && !quiet {
        warn_msg(format!("No markdown files found under {}", options.root.display()));
    }

    writeln!(stdout, "Done.")?;
    stdout.flush()?;

    if !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        rule_summary::print_summary(&report.summary, &mut io::stderr(), stderr_supports_color)?;
    }

    info!(
        "Sanitize operation completed: {} of {} file(s) rewritten.",
        report.changed.len(),
        report.visited
    );
    Ok(())
}

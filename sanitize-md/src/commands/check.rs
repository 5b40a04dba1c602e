// sanitize-md/src/commands/check.rs
//! `check`: dry run for CI. Nothing is written.

use anyhow::{bail, Context, Result};
use log::info;
use sanitize_md_core::{sanitize_tree, SubstitutionSummaryItem, TreeOptions};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{build_engine, error_msg, info_msg, LineReporter};
use crate::cli::CheckCommand;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    root: &'a Path,
    visited: usize,
    would_change: &'a [PathBuf],
    summary: &'a [SubstitutionSummaryItem],
}

/// Returns `true` when at least one document would be rewritten.
pub fn run_check(cmd: &CheckCommand, quiet: bool) -> Result<bool> {
    info!("Starting check operation on {}.", cmd.tree.root.display());

    let engine = build_engine(&cmd.rules)?;
    let options = TreeOptions {
        root: cmd.tree.root.clone(),
        dry_run: true,
        continue_on_error: true,
    };

    let stdout = io::stdout().lock();
    let report = if cmd.json_stdout {
        let report = sanitize_tree(&options, &engine, &mut |_: &Path| {})
            .with_context(|| format!("Failed to check markdown under {}", options.root.display()))?;
        let mut stdout = stdout;
        serde_json::to_writer_pretty(
            &mut stdout,
            &CheckReport {
                root: &options.root,
                visited: report.visited,
                would_change: &report.changed,
                summary: &report.summary,
            },
        )
        .context("Failed to serialize check report")?;
        writeln!(stdout)?;
        report
    } else {
        let mut reporter = LineReporter::new(stdout, "Would sanitize:");
        let result = sanitize_tree(&options, &engine, &mut reporter);
        reporter.finish().context("Failed to write to stdout")?;
        result.with_context(|| format!("Failed to check markdown under {}", options.root.display()))?
    };

    for failed in &report.failed {
        error_msg(format!("{}: {}", failed.path.display(), failed.error));
    }
    if report.has_failures() {
        bail!("{} markdown file(s) could not be checked", report.failed.len());
    }

    if !quiet && !cmd.json_stdout {
        if report.has_changes() {
            info_msg(format!(
                "{} of {} markdown file(s) need sanitizing.",
                report.changed.len(),
                report.visited
            ));
        } else {
            info_msg(format!("All {} markdown file(s) are clean.", report.visited));
        }
    }

    Ok(report.has_changes())
}

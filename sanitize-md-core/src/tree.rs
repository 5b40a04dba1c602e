// sanitize-md-core/src/tree.rs
//! Rewrites every markdown document under a docs root in place.
//!
//! A document is written back only when sanitization changed it, and each
//! changed path is handed to the caller's `ChangeReporter` exactly once.
//! By default the first I/O error aborts the run; `continue_on_error` turns
//! failures into `TreeReport::failed` entries instead.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SubstitutionSummaryItem;
use crate::engine::SanitizationEngine;
use crate::errors::SanitizeError;
use crate::escape_match::merge_summaries;
use crate::walker::MarkdownFiles;

/// Where the docs site keeps its markdown sources.
pub const DEFAULT_DOCS_ROOT: &str = "./docs-source";

#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub root: PathBuf,
    /// Compute changes and notify the reporter without writing anything.
    pub dry_run: bool,
    /// Log and record failing documents instead of aborting the traversal.
    pub continue_on_error: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_DOCS_ROOT),
            dry_run: false,
            continue_on_error: false,
        }
    }
}

impl TreeOptions {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

/// Receives the path of every document that was (or, in a dry run, would be) rewritten.
pub trait ChangeReporter {
    fn on_sanitized(&mut self, path: &Path);
}

impl<F: FnMut(&Path)> ChangeReporter for F {
    fn on_sanitized(&mut self, path: &Path) {
        self(path)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedDocument {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct TreeReport {
    /// Markdown documents read.
    pub visited: usize,
    /// Changed documents, in traversal order.
    pub changed: Vec<PathBuf>,
    pub failed: Vec<FailedDocument>,
    pub summary: Vec<SubstitutionSummaryItem>,
}

impl TreeReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Sanitizes every `.md` file under `options.root`.
pub fn sanitize_tree(
    options: &TreeOptions,
    engine: &dyn SanitizationEngine,
    reporter: &mut dyn ChangeReporter,
) -> Result<TreeReport, SanitizeError> {
    if !options.root.is_dir() {
        return Err(SanitizeError::RootNotFound(options.root.clone()));
    }

    info!(
        "Sanitizing markdown under {} (dry run: {}).",
        options.root.display(),
        options.dry_run
    );

    let mut report = TreeReport::default();

    for entry in MarkdownFiles::new(&options.root) {
        let outcome = entry.and_then(|path| {
            report.visited += 1;
            let changed = sanitize_document(&path, engine, options.dry_run)?;
            Ok((path, changed))
        });

        match outcome {
            Ok((path, Some(summary))) => {
                reporter.on_sanitized(&path);
                merge_summaries(&mut report.summary, summary);
                report.changed.push(path);
            }
            Ok((path, None)) => debug!("Unchanged: {}", path.display()),
            Err(e) if options.continue_on_error => {
                warn!("Skipping document after error: {}", e);
                report.failed.push(FailedDocument {
                    path: failed_path(&e, &options.root),
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Visited {} markdown file(s); {} changed, {} failed.",
        report.visited,
        report.changed.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Sanitizes a single document. Returns its summary if the content changed.
pub fn sanitize_document(
    path: &Path,
    engine: &dyn SanitizationEngine,
    dry_run: bool,
) -> Result<Option<Vec<SubstitutionSummaryItem>>, SanitizeError> {
    let original = fs::read_to_string(path).map_err(|e| SanitizeError::io(path, e))?;
    let source_id = path.to_string_lossy();
    let (cleaned, summary) = engine.sanitize(&original, &source_id)?;

    if cleaned == original {
        return Ok(None);
    }

    if !dry_run {
        fs::write(path, cleaned.as_bytes()).map_err(|e| SanitizeError::io(path, e))?;
        info!("Sanitized: {}", path.display());
    }
    Ok(Some(summary))
}

fn failed_path(error: &SanitizeError, root: &Path) -> PathBuf {
    match error {
        SanitizeError::Io { path, .. } => path.clone(),
        SanitizeError::Walk(e) => e.path().unwrap_or(root).to_path_buf(),
        _ => root.to_path_buf(),
    }
}

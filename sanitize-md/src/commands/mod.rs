// sanitize-md/src/commands/mod.rs
//! Command implementations and the helpers they share.

pub mod check;
pub mod rules;
pub mod sanitize;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use sanitize_md_core::{merge_rules, ChangeReporter, RegexEngine, RuleConfig};
use std::io::{self, Write};
use std::path::Path;

use crate::cli::RuleArgs;
use crate::ui::output_format;

/// Defaults, merged with the user's rule file, minus disabled rules.
pub fn load_rule_config(args: &RuleArgs) -> Result<RuleConfig> {
    let defaults = RuleConfig::load_default_rules()?;
    let user = match &args.config {
        Some(path) => Some(
            RuleConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rule file {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(defaults, user);
    config.set_active_rules(&args.disable);
    debug!("Active rules: {:?}", config.rule_names());
    Ok(config)
}

pub fn build_engine(args: &RuleArgs) -> Result<RegexEngine> {
    RegexEngine::new(load_rule_config(args)?)
}

/// Writes `<prefix> <path>` for every reported document.
///
/// The reporter callback cannot fail, so the first write error is kept and
/// surfaced by `finish`.
pub struct LineReporter<W: Write> {
    writer: W,
    prefix: &'static str,
    error: Option<io::Error>,
}

impl<W: Write> LineReporter<W> {
    pub fn new(writer: W, prefix: &'static str) -> Self {
        Self { writer, prefix, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ChangeReporter for LineReporter<W> {
    fn on_sanitized(&mut self, path: &Path) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{} {}", self.prefix, path.display()) {
            self.error = Some(e);
        }
    }
}

pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn line_reporter_prefixes_each_path() {
        let mut reporter = LineReporter::new(Vec::new(), "Sanitized:");
        reporter.on_sanitized(&PathBuf::from("docs/a.md"));
        reporter.on_sanitized(&PathBuf::from("docs/b.md"));
        let out = reporter.finish().unwrap();
        let text = String::from_utf8(out).unwrap().replace('\\', "/");
        assert_eq!(text, "Sanitized: docs/a.md\nSanitized: docs/b.md\n");
    }

    #[test_log::test]
    fn disabled_rules_are_removed() {
        let args = RuleArgs {
            config: None,
            disable: vec!["short_tag".to_string()],
        };
        let config = load_rule_config(&args).unwrap();
        assert_eq!(config.rule_names(), vec!["self_closing_tag", "tag", "eq_attr"]);
    }
}

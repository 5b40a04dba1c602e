// sanitize-md-core/src/headless.rs
//! Convenience wrappers for one-shot, non-interactive sanitization of strings.

use anyhow::Result;

use crate::config::RuleConfig;
use crate::engine::SanitizationEngine;
use crate::engines::regex_engine::RegexEngine;

/// Sanitizes `content` with an explicit rule set.
///
/// # Arguments
///
/// * `config` - The merged `RuleConfig` (defaults plus optional user overrides).
/// * `content` - The markdown text to sanitize.
/// * `source_id` - A stable identifier for the input, used in debug logs.
pub fn headless_sanitize_string(config: RuleConfig, content: &str, source_id: &str) -> Result<String> {
    let engine = RegexEngine::new(config)?;
    let (sanitized_content, _) = engine.sanitize(content, source_id)?;
    Ok(sanitized_content)
}

/// Sanitizes `content` with the built-in MDX escaping rules.
///
/// Only fails if the embedded default rules cannot be loaded or compiled.
pub fn sanitize_text(content: &str) -> Result<String> {
    Ok(RegexEngine::with_default_rules()?.escape(content))
}

// sanitize-md-core/src/engines/regex_engine.rs
//! A `SanitizationEngine` implementation that applies ordered regex
//! substitution rules to markdown text.
//!
//! Rules run one at a time over the whole document. Before the first rule,
//! existing code spans and code blocks are masked off; every replacement is
//! masked as well, so a sequence is escaped by the first rule that matches it
//! and never again. A match that already sits between backticks counts as
//! escaped, which keeps a second pass a no-op even next to a stray backtick.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{RuleConfig, SubstitutionSummaryItem};
use crate::engine::SanitizationEngine;
use crate::escape_match::{log_escape_match_debug, summarize_matches, EscapeMatch};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};
use crate::sanitizers::spans::{is_backtick_wrapped, join_segments, split_code_spans, Segment};

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: RuleConfig,
}

impl RegexEngine {
    pub fn new(config: RuleConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile substitution rules for RegexEngine")?;

        Ok(Self { compiled_rules, config })
    }

    /// Engine loaded with the built-in rule set.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RuleConfig::load_default_rules()?)
    }

    /// Infallible core of `sanitize`: rewritten text only.
    pub fn escape(&self, content: &str) -> String {
        let (segments, _) = self.run_rules(content, "");
        join_segments(&segments)
    }

    fn run_rules<'a>(&self, content: &'a str, source_id: &str) -> (Vec<Segment<'a>>, Vec<EscapeMatch>) {
        let mut segments = split_code_spans(content);
        let mut matches = Vec::new();

        for rule in &self.compiled_rules.rules {
            let mut next = Vec::with_capacity(segments.len());
            for segment in segments {
                match segment {
                    Segment::Plain { text, offset } => {
                        apply_rule(rule, content, text, offset, source_id, &mut next, &mut matches)
                    }
                    protected => next.push(protected),
                }
            }
            segments = next;
        }

        (segments, matches)
    }

    fn rule_order(&self) -> Vec<&str> {
        self.compiled_rules.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Runs one rule over a plain segment, splitting it around each match.
fn apply_rule<'a>(
    rule: &CompiledRule,
    document: &str,
    text: &'a str,
    offset: usize,
    source_id: &str,
    out: &mut Vec<Segment<'a>>,
    matches: &mut Vec<EscapeMatch>,
) {
    let mut last = 0;

    for caps in rule.regex.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.as_str().is_empty()
            || is_backtick_wrapped(document, offset + whole.start(), offset + whole.end())
        {
            continue;
        }

        if last < whole.start() {
            out.push(Segment::Plain {
                text: &text[last..whole.start()],
                offset: offset + last,
            });
        }

        let escaped = rule.expand(&caps);
        let m = EscapeMatch {
            rule_name: rule.name.clone(),
            original_string: whole.as_str().to_string(),
            escaped_string: escaped.clone(),
            start: (offset + whole.start()) as u64,
            end: (offset + whole.end()) as u64,
            source_id: source_id.to_string(),
        };
        log_escape_match_debug(module_path!(), &m);
        matches.push(m);

        out.push(Segment::Escaped(escaped));
        last = whole.end();
    }

    if last < text.len() {
        out.push(Segment::Plain {
            text: &text[last..],
            offset: offset + last,
        });
    }
}

impl SanitizationEngine for RegexEngine {
    fn sanitize(&self, content: &str, source_id: &str) -> Result<(String, Vec<SubstitutionSummaryItem>)> {
        let (segments, matches) = self.run_rules(content, source_id);
        let summary = summarize_matches(&self.rule_order(), &matches);
        Ok((join_segments(&segments), summary))
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<EscapeMatch>> {
        let (_, mut matches) = self.run_rules(content, source_id);
        matches.sort_by_key(|m| m.start);
        Ok(matches)
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &RuleConfig {
        &self.config
    }
}

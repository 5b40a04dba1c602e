//! Records of individual escapes and the per-rule summaries built from them.

use log::debug;
use serde::Serialize;

use crate::config::SubstitutionSummaryItem;

/// A single tag-like sequence that a rule turned into an inline code span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct EscapeMatch {
    pub rule_name: String,
    pub original_string: String,
    pub escaped_string: String,
    /// Byte offsets into the document as it was before sanitization.
    pub start: u64,
    pub end: u64,
    pub source_id: String,
}

pub fn log_escape_match_debug(module_path: &str, m: &EscapeMatch) {
    debug!(
        "{} Rule '{}' escaped '{}' at {}..{} in {}",
        module_path, m.rule_name, m.original_string, m.start, m.end, m.source_id
    );
}

/// Groups matches by rule, keeping `rule_order` and dropping rules with no hits.
pub fn summarize_matches(rule_order: &[&str], matches: &[EscapeMatch]) -> Vec<SubstitutionSummaryItem> {
    rule_order
        .iter()
        .filter_map(|name| {
            let hits: Vec<&EscapeMatch> = matches.iter().filter(|m| m.rule_name == *name).collect();
            if hits.is_empty() {
                return None;
            }
            Some(SubstitutionSummaryItem {
                rule_name: name.to_string(),
                occurrences: hits.len(),
                original_texts: hits.iter().map(|m| m.original_string.clone()).collect(),
                escaped_texts: hits.iter().map(|m| m.escaped_string.clone()).collect(),
            })
        })
        .collect()
}

/// Folds a file's summary into a running total, preserving first-seen rule order.
pub fn merge_summaries(total: &mut Vec<SubstitutionSummaryItem>, items: Vec<SubstitutionSummaryItem>) {
    for item in items {
        match total.iter_mut().find(|t| t.rule_name == item.rule_name) {
            Some(existing) => {
                existing.occurrences += item.occurrences;
                existing.original_texts.extend(item.original_texts);
                existing.escaped_texts.extend(item.escaped_texts);
            }
            None => total.push(item),
        }
    }
}

//! Configuration management for `sanitize-md-core`.
//!
//! This module defines the substitution rules applied to markdown documents and
//! the ordered `RuleConfig` that carries them. It handles YAML (de)serialization
//! and provides utilities for loading, merging, and validating rule sets.
//!
//! Rule order is significant: rules run one after another and each later rule
//! only sees text that earlier rules left unescaped.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single ordered substitution applied by the regex engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct SubstitutionRule {
    /// Unique identifier for the rule (e.g., "self_closing_tag").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Replacement template. `${1}`-style references expand to capture groups.
    pub replace_with: String,
    /// If true, enables multiline mode for the regex engine.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for SubstitutionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replace_with: "`${0}`".to_string(),
            multiline: false,
            dot_matches_new_line: false,
            enabled: None,
        }
    }
}

impl SubstitutionRule {
    /// Rules are active unless explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// The ordered rule set.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Hash)]
pub struct RuleConfig {
    pub rules: Vec<SubstitutionRule>,
}

/// Per-rule tally of what a sanitization pass escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstitutionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub escaped_texts: Vec<String>,
}

impl RuleConfig {
    /// Loads substitution rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RuleConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the built-in MDX escaping rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RuleConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Drops the named rules, keeping the order of the rest.
    pub fn set_active_rules(&mut self, disable_rules: &[String]) {
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        debug!("Initial rules count before filtering: {}", self.rules.len());
        self.rules.retain(|rule| !disable_set.contains(rule.name.as_str()));
        debug!("Final active rules count after filtering: {}", self.rules.len());
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Merges user-defined rules into the defaults.
///
/// A user rule whose name matches a default rule replaces it at the same
/// position. Unknown names are appended in the order they appear in the user
/// file.
pub fn merge_rules(default_config: RuleConfig, user_config: Option<RuleConfig>) -> RuleConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("Overriding rule '{}' with user definition.", user_rule.name);
                    *existing = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    RuleConfig { rules: final_rules }
}

/// Validates rule integrity (names, regex compilation, capture references).
fn validate_rules(rules: &[SubstitutionRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();
    let capture_ref_regex = Regex::new(r"\$\{?(\d+)\}?")?;

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        let regex = match Regex::new(pattern) {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        // captures_len includes the implicit whole-match group 0.
        let group_count = regex.captures_len() - 1;
        for cap in capture_ref_regex.captures_iter(&rule.replace_with) {
            if let Some(group_num) = cap.get(1).and_then(|g| g.as_str().parse::<usize>().ok()) {
                if group_num > group_count {
                    errors.push(format!(
                        "Rule '{}': replacement references non-existent capture group '${}'.",
                        rule.name, group_num
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str, replace_with: &str) -> SubstitutionRule {
        SubstitutionRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            replace_with: replace_with.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn default_rules_are_in_application_order() {
        let config = RuleConfig::load_default_rules().unwrap();
        assert_eq!(
            config.rule_names(),
            vec!["self_closing_tag", "tag", "short_tag", "eq_attr"]
        );
        validate_rules(&config.rules).unwrap();
    }

    #[test]
    fn validate_rejects_missing_capture_group() {
        let err = validate_rules(&[rule("bad", "<(a)>", "`${2}`")]).unwrap_err();
        assert!(err.to_string().contains("non-existent capture group '$2'"));
    }

    #[test]
    fn validate_rejects_duplicates_and_bad_regex() {
        let err = validate_rules(&[
            rule("dup", "a", "b"),
            rule("dup", "a", "b"),
            rule("broken", "(", "x"),
        ])
        .unwrap_err()
        .to_string();
        assert!(err.contains("Duplicate rule name found: 'dup'."));
        assert!(err.contains("Rule 'broken' has an invalid regex pattern"));
    }

    #[test]
    fn validate_rejects_overlong_pattern() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = validate_rules(&[rule("long", &long, "x")]).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum allowed"));
    }

    #[test]
    fn set_active_rules_keeps_order() {
        let mut config = RuleConfig::load_default_rules().unwrap();
        config.set_active_rules(&["tag".to_string(), "nope".to_string()]);
        assert_eq!(
            config.rule_names(),
            vec!["self_closing_tag", "short_tag", "eq_attr"]
        );
    }
}

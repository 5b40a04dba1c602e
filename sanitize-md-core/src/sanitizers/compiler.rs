//! compiler.rs - Manages the compilation and caching of substitution rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `RuleConfig` into `CompiledRules`. It uses a global, shared cache to avoid
//! recompiling the same rule set for every document in a tree.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{RuleConfig, SubstitutionRule, MAX_PATTERN_LENGTH};
use crate::errors::SanitizeError;

/// A single compiled substitution rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// Replacement template, expanded against each match's captures.
    pub replace_with: String,
    /// The unique name of the substitution rule.
    pub name: String,
}

impl CompiledRule {
    /// Expands the replacement template for one match.
    pub fn expand(&self, caps: &regex::Captures<'_>) -> String {
        let mut out = String::new();
        caps.expand(&self.replace_with, &mut out);
        out
    }
}

/// The ordered set of rules an engine applies.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

lazy_static! {
    /// Keyed by a hash of the `RuleConfig`. Rule order is part of the key.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &RuleConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

/// Compiles rules in order, skipping disabled ones and rules with no pattern.
pub fn compile_rules(rules_to_compile: Vec<SubstitutionRule>) -> Result<CompiledRules, SanitizeError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_enabled() {
            debug!("Rule '{}' is disabled; not compiling.", &rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_ref() else {
            warn!("Skipping rule '{}' because its pattern is missing.", &rule.name);
            continue;
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(SanitizeError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(pattern)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .size_limit(10 * (1 << 20))
            .build();

        match regex_result {
            Ok(regex) => {
                debug!(
                    target: "sanitize_md_core::sanitizer",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with,
                    name: rule.name,
                });
            }
            Err(e) => compilation_errors.push(SanitizeError::RuleCompilation(rule.name, e)),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(SanitizeError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &RuleConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = Arc::new(compile_rules(config.rules.clone())?);

    COMPILED_RULES_CACHE
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled)
}

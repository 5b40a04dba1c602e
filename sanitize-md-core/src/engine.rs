// sanitize-md-core/src/engine.rs
//! Defines the core `SanitizationEngine` trait.
//!
//! The trait decouples the tree traversal and the CLI from the concrete
//! escaping strategy. Engines must be pure with respect to their input: the
//! same content always produces the same output, with no I/O.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::config::{RuleConfig, SubstitutionSummaryItem};
use crate::escape_match::EscapeMatch;
use crate::sanitizers::compiler::CompiledRules;

pub trait SanitizationEngine: Send + Sync {
    /// Escapes every tag-like sequence in `content`.
    ///
    /// Returns the rewritten text and a per-rule summary of what was escaped.
    ///
    /// # Arguments
    /// * `content` - The markdown text to sanitize.
    /// * `source_id` - The name or identifier of the source (usually a file path).
    fn sanitize(&self, content: &str, source_id: &str) -> Result<(String, Vec<SubstitutionSummaryItem>)>;

    /// Finds what `sanitize` would escape without producing output text.
    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<EscapeMatch>>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn get_rules(&self) -> &RuleConfig;
}

// sanitize-md-core/src/lib.rs
//! # sanitize-md Core Library
//!
//! `sanitize-md-core` escapes literal angle-bracket sequences in markdown so that an
//! MDX-aware renderer does not parse them as JSX elements. `<Foo>`, `<T>`, `<a=1>`
//! and `<Widget x="y" />` become inline code spans.
//!
//! ## Modules
//!
//! * `config`: `SubstitutionRule`s and the ordered `RuleConfig`; YAML loading and merging.
//! * `sanitizers`: rule compilation (`compiler`) and code-span masking (`spans`).
//! * `engine`: the `SanitizationEngine` trait.
//! * `engines`: concrete engines; `RegexEngine` applies the rules.
//! * `escape_match`: per-escape records and per-rule summaries.
//! * `walker`: lazy discovery of `.md` files under a docs root.
//! * `tree`: in-place sanitization of a whole docs tree.
//! * `headless`: one-shot string helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use sanitize_md_core::sanitize_text;
//!
//! fn main() -> anyhow::Result<()> {
//!     let out = sanitize_text(r#"Use <Component foo="bar" /> here."#)?;
//!     assert_eq!(out, r#"Use `<Component foo="bar" />` here."#);
//!     Ok(())
//! }
//! ```
//!
//! ## Escaping model
//!
//! Rules run in order over the whole document. Existing code spans and every
//! replacement are masked from later rules, so each sequence is wrapped at most
//! once and running the sanitizer on its own output changes nothing.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod escape_match;
pub mod headless;
pub mod sanitizers;
pub mod tree;
pub mod walker;

pub use config::{merge_rules, RuleConfig, SubstitutionRule, SubstitutionSummaryItem, MAX_PATTERN_LENGTH};

pub use errors::SanitizeError;

pub use engine::SanitizationEngine;

pub use engines::regex_engine::RegexEngine;

pub use escape_match::EscapeMatch;

pub use headless::{headless_sanitize_string, sanitize_text};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};

pub use tree::{sanitize_document, sanitize_tree, ChangeReporter, TreeOptions, TreeReport, DEFAULT_DOCS_ROOT};

pub use walker::MarkdownFiles;

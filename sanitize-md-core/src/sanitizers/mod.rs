//! Rule compilation and text segmentation used by the sanitization engines.
//!
//! `compiler` turns a `RuleConfig` into cached, ordered `CompiledRules`.
//! `spans` splits a document into the segments rules may and may not search,
//! which is what keeps every tag-like sequence escaped exactly once.

pub mod compiler;
pub mod spans;

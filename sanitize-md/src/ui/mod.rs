//! Terminal output helpers.

pub mod output_format;
pub mod rule_summary;

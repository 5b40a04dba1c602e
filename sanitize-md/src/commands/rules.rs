// sanitize-md/src/commands/rules.rs
//! `rules`: print the active rule set in application order.

use anyhow::Result;
use sanitize_md_core::{RuleConfig, SanitizationEngine};
use std::io::{self, Write};

use super::build_engine;
use crate::cli::RulesCommand;

/// Lists the rules as the engine will run them, so a rule set that fails to
/// compile is reported here too.
pub fn run_rules(cmd: &RulesCommand) -> Result<()> {
    let engine = build_engine(&cmd.rules)?;
    let mut stdout = io::stdout().lock();
    write_rules(engine.get_rules(), &mut stdout)?;
    Ok(())
}

pub fn write_rules<W: Write>(config: &RuleConfig, writer: &mut W) -> io::Result<()> {
    for (i, rule) in config.rules.iter().enumerate() {
        let state = if rule.is_enabled() { "" } else { " (disabled)" };
        writeln!(writer, "{}. {}{}", i + 1, rule.name, state)?;
        if let Some(description) = &rule.description {
            writeln!(writer, "   {}", description)?;
        }
        writeln!(
            writer,
            "   {}  ->  {}",
            rule.pattern.as_deref().unwrap_or("<no pattern>"),
            rule.replace_with
        )?;
    }
    Ok(())
}

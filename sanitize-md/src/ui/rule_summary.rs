// sanitize-md/src/ui/rule_summary.rs
//! Per-rule escape counts printed after a run.

use owo_colors::OwoColorize;
use sanitize_md_core::SubstitutionSummaryItem;
use std::io::{self, Write};

/// How many distinct originals to show per rule.
const MAX_SAMPLES: usize = 3;

pub fn print_summary<W: Write>(
    summary: &[SubstitutionSummaryItem],
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return Ok(());
    }

    writeln!(writer, "Escape summary:")?;
    for item in summary {
        let mut samples: Vec<&str> = Vec::new();
        for text in &item.original_texts {
            if samples.len() == MAX_SAMPLES {
                break;
            }
            if !samples.contains(&text.as_str()) {
                samples.push(text);
            }
        }

        if supports_color {
            write!(writer, "  {} ", item.rule_name.magenta())?;
            write!(writer, "{}", item.occurrences.bold())?;
        } else {
            write!(writer, "  {} {}", item.rule_name, item.occurrences)?;
        }
        writeln!(writer, " ({})", samples.join(", "))?;
    }
    Ok(())
}

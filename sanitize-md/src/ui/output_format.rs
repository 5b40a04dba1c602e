// sanitize-md/src/ui/output_format.rs
//! Coloured status messages for stderr.
//!
//! Colour is only applied when the caller says the stream is a terminal, so
//! piped output and test captures stay plain.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.cyan())
    } else {
        writeln!(writer, "{}", msg)
    }
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(writer, "error: {}", msg)
    }
}

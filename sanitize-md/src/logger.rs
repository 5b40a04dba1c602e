// sanitize-md/src/logger.rs
//! Logger setup for the CLI.
//!
//! Logs go to stderr so stdout stays reserved for the per-file report lines.
//! `RUST_LOG` is honoured unless a level override is given.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

const CRATE_TARGETS: [&str; 2] = ["sanitize_md", "sanitize_md_core"];

/// Initializes `env_logger`. Safe to call more than once; later calls are ignored.
///
/// * `None` - use `RUST_LOG`, defaulting to `warn`.
/// * `Some(LevelFilter::Off)` - silence everything.
/// * `Some(level)` - force `level` for the sanitize-md crates.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    match level_override {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            for target in CRATE_TARGETS {
                builder.filter_module(target, level);
            }
        }
        None => {}
    }

    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });

    let _ = builder.try_init();
}

// sanitize-md/src/lib.rs
//! # sanitize-md CLI Application
//!
//! Command-line front end for `sanitize-md-core`. The binary in `main.rs` is a
//! thin dispatcher; command logic lives in `commands` so it can be tested.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

// redactx/src/logger.rs
//! Logger bootstrap for the CLI.
//!
//! `RUST_LOG` is honoured unless a level override is passed in, in which case
//! the override applies to both crates of the workspace.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder
            .filter_module("redactx", level)
            .filter_module("redactx_core", level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}

/// Maps the global `--quiet` / `--debug` flags to a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

// redactx/src/lib.rs
//! # RedactX CLI
//!
//! Command-line front end for `redactx-core`: redact text with a profile's
//! rules, manage the rule list and settings, and import or export rule files.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

use anyhow::Result;
use redactx_core::FileStore;

use crate::cli::{Cli, Commands};
use crate::commands::redact::{run_redact, RedactOptions};
use crate::commands::rules::run_rules;
use crate::commands::settings::run_settings;
use crate::commands::CommandContext;
use crate::ui::theme::ThemeMap;

/// Opens the selected profile and runs the parsed command.
pub async fn run(cli: Cli, theme: ThemeMap) -> Result<()> {
    let store = FileStore::open(cli.store.as_deref(), &cli.profile);
    log::debug!("Using profile directory {}", store.dir().display());
    let ctx = CommandContext { store, theme, quiet: cli.quiet };

    match cli.command {
        Commands::Redact(args) => {
            let opts = RedactOptions {
                input_file: args.input_file,
                output: args.output,
                diff: args.diff,
                clipboard: args.clipboard,
                no_summary: args.no_summary,
            };
            run_redact(&ctx, opts).await
        }
        Commands::Rules(cmd) => run_rules(&ctx, cmd).await,
        Commands::Settings(cmd) => run_settings(&ctx, cmd).await,
    }
}

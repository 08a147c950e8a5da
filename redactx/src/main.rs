// redactx/src/main.rs
//! RedactX entry point.

use std::process::ExitCode;

use clap::Parser;

use redactx::cli::Cli;
use redactx::commands::error_msg;
use redactx::logger;
use redactx::ui::theme::{build_theme_map, ThemeStyle};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let theme = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            return ExitCode::FAILURE;
        }
    };
    let error_theme = theme.clone();

    match redactx::run(cli, theme).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            error_msg(format!("{:#}", e), &error_theme);
            ExitCode::FAILURE
        }
    }
}

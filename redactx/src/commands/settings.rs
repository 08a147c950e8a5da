// redactx/src/commands/settings.rs
use std::io::{self, Write};

use anyhow::{Context, Result};
use log::debug;

use redactx_core::{RuleStore, Settings};

use crate::cli::SettingsCommand;
use crate::commands::CommandContext;

pub async fn run_settings(ctx: &CommandContext, cmd: SettingsCommand) -> Result<()> {
    match cmd {
        SettingsCommand::Show => {
            let settings = ctx.store.get_settings().await;
            write_settings(&mut io::stdout().lock(), &settings)?;
            Ok(())
        }
        SettingsCommand::Set { delimiter, anywhere, position } => {
            if delimiter.is_none() && anywhere.is_none() && position.is_none() {
                ctx.warn("Nothing to change. Pass --delimiter, --anywhere or --position.");
                return Ok(());
            }
            let mut settings = ctx.store.get_settings().await;
            if let Some(style) = delimiter {
                settings.delimiter_style = style;
            }
            if let Some(flag) = anywhere {
                settings.use_anywhere_mode = flag;
            }
            if let Some(pos) = position {
                settings.hover_area_position = pos;
            }
            debug!("New settings: {:?}", settings);
            ctx.store
                .save_settings(&settings)
                .await
                .context("Failed to save settings")?;
            ctx.success("Settings saved.");
            Ok(())
        }
    }
}

fn write_settings<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(out, "delimiter_style: {}", settings.delimiter_style)?;
    writeln!(out, "use_anywhere_mode: {}", settings.use_anywhere_mode)?;
    writeln!(out, "hover_area_position: {}", settings.hover_area_position)
}

// redactx/src/commands/redact.rs
//! The `redact` command: read text, apply the profile's rules, write the result.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};

use redactx_core::{headless_redact_with_summary, RedactionSummaryItem};

use crate::commands::CommandContext;
use crate::ui::{diff_viewer, redaction_summary};
use crate::utils::clipboard::copy_to_clipboard;

pub struct RedactOptions {
    pub input_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub diff: bool,
    pub clipboard: bool,
    pub no_summary: bool,
}

pub async fn run_redact(ctx: &CommandContext, opts: RedactOptions) -> Result<()> {
    let input = read_input(opts.input_file.as_ref())?;
    info!("Starting redaction of {} byte(s).", input.len());

    let (redacted, summary) = headless_redact_with_summary(&ctx.store, &input).await;
    debug!("Redacted length: {} byte(s).", redacted.len());

    write_primary_output(ctx, &opts, &input, &redacted)?;

    if opts.clipboard {
        match copy_to_clipboard(&redacted) {
            Ok(()) => ctx.info("Redacted text copied to clipboard."),
            Err(e) => ctx.warn(format!("Failed to copy to clipboard: {:#}", e)),
        }
    }

    print_summary(ctx, &opts, &summary)?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_primary_output(ctx: &CommandContext, opts: &RedactOptions, input: &str, redacted: &str) -> Result<()> {
    if let Some(path) = &opts.output {
        ctx.info(format!("Writing redacted content to file: {}", path.display()));
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        if opts.diff {
            diff_viewer::print_diff(input, redacted, &mut file, &ctx.theme, false)?;
        } else {
            file.write_all(redacted.as_bytes())?;
        }
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        let mut writer = stdout.lock();
        if opts.diff {
            diff_viewer::print_diff(input, redacted, &mut writer, &ctx.theme, supports_color)?;
        } else {
            writer.write_all(redacted.as_bytes())?;
            if supports_color && !redacted.ends_with('\n') {
                writeln!(writer)?;
            }
        }
        writer.flush()?;
    }
    Ok(())
}

fn print_summary(ctx: &CommandContext, opts: &RedactOptions, summary: &[RedactionSummaryItem]) -> Result<()> {
    if opts.no_summary || ctx.quiet {
        return Ok(());
    }
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    redaction_summary::print_summary(summary, &mut stderr.lock(), &ctx.theme, supports_color)
}

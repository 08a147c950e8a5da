// redactx/src/ui/diff_viewer.rs
//! Line diff between the original and redacted text.
//!
//! Removed lines are prefixed with `-`, added lines with `+`, and unchanged
//! context lines with two spaces.

use std::io::Write;

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

pub fn print_diff<W: Write>(
    original: &str,
    redacted: &str,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let patch = create_patch(original, redacted);
    let header = "--- Diff View ---";
    if supports_color {
        writeln!(writer, "{}", header.color(color_for(theme, ThemeEntry::DiffHeader)))?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            let (prefix, text, entry) = match line {
                DiffLine::Delete(s) => ("-", *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ("+", *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (" ", *s, None),
            };
            changed |= entry.is_some();
            let text = text.trim_end_matches(['\r', '\n']);
            match entry {
                Some(entry) if supports_color => {
                    let rendered = format!("{} {}", prefix, text);
                    writeln!(writer, "{}", rendered.color(color_for(theme, entry)))?;
                }
                _ => writeln!(writer, "{} {}", prefix, text)?,
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes detected.")?;
    }
    if supports_color {
        writeln!(writer, "{}", "-----------------".color(color_for(theme, ThemeEntry::DiffHeader)))?;
    } else {
        writeln!(writer, "-----------------")?;
    }
    Ok(())
}

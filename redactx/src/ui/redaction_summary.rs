// redactx/src/ui/redaction_summary.rs
//! Summary table printed after a redaction: one row per placeholder label.

use std::io::Write;

use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use redactx_core::RedactionSummaryItem;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// Builds the summary table. Plain text; colouring is applied by the caller.
pub fn build_summary_table(summary: &[RedactionSummaryItem]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Label", "Occurrences", "Placeholders"]);
    for item in summary {
        table.add_row(vec![
            Cell::new(&item.label),
            Cell::new(item.occurrences),
            Cell::new(item.placeholders.join(", ")),
        ]);
    }
    table
}

pub fn print_summary<W: Write>(
    summary: &[RedactionSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let title = "--- Redaction Summary ---";
    if summary.is_empty() {
        writeln!(writer, "{}", title)?;
        writeln!(writer, "No redactions applied.")?;
        return Ok(());
    }

    let total: usize = summary.iter().map(|s| s.occurrences).sum();
    if supports_color {
        writeln!(writer, "{}", title.color(color_for(theme, ThemeEntry::Header)))?;
    } else {
        writeln!(writer, "{}", title)?;
    }
    writeln!(writer, "{}", build_summary_table(summary))?;
    let footer = format!("{} redaction(s) across {} label(s).", total, summary.len());
    if supports_color {
        writeln!(writer, "{}", footer.color(color_for(theme, ThemeEntry::SummaryOccurrences)))?;
    } else {
        writeln!(writer, "{}", footer)?;
    }
    Ok(())
}

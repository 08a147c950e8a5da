// redactx/src/ui/mod.rs
//! Terminal output: theme, status messages, diff view and summary table.

pub mod diff_viewer;
pub mod output_format;
pub mod redaction_summary;
pub mod theme;

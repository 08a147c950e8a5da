// redactx/src/commands/mod.rs
//! Command implementations and the themed message helpers they share.
//!
//! Status messages go to stderr so that stdout carries only command output
//! (redacted text, exported rules, listings).

pub mod redact;
pub mod rules;
pub mod settings;

use std::io;

use is_terminal::IsTerminal;
use redactx_core::FileStore;

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// What every command needs: the profile store, the theme and the quiet flag.
pub struct CommandContext {
    pub store: FileStore,
    pub theme: ThemeMap,
    pub quiet: bool,
}

impl CommandContext {
    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            info_msg(msg, &self.theme);
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            success_msg(msg, &self.theme);
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        warn_msg(msg, &self.theme);
    }
}

pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, color);
}

pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, color);
}

pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, color);
}

pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, color);
}

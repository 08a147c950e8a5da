// redactx/src/cli.rs
//! This file defines the command-line interface (CLI) for the redactx application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use redactx_core::{DelimiterStyle, HoverPosition, ImportMode, RuleKind};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "redactx",
    author = "RedactX Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact sensitive text with your own rules and stable placeholders",
    long_about = "RedactX replaces sensitive substrings with labelled placeholders such as [[Email-1]]. Rules are literal strings or regular expressions, kept per profile, and can be grouped under dividers, imported and exported as tab-separated files, and merged with existing lists.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Profile whose rules and settings are used.
    #[arg(long, short = 'p', global = true, env = "REDACTX_PROFILE", default_value = "default", value_name = "NAME")]
    pub profile: String,

    /// Directory holding all profiles.
    #[arg(long, global = true, env = "REDACTX_HOME", value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", global = true, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Suppress all informational and debug messages.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `redactx` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redacts an input file or stdin with the profile's rules.
    Redact(RedactCommand),

    /// Views and edits the profile's rule list.
    #[command(subcommand)]
    Rules(RulesCommand),

    /// Views and edits the profile's settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Arguments for the `redact` command.
#[derive(Args, Debug)]
pub struct RedactCommand {
    /// Read input from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show a unified diff of the changes instead of the redacted text.
    #[arg(long, short = 'D')]
    pub diff: bool,

    /// Copy the redacted text to the system clipboard.
    #[arg(long, short = 'c')]
    pub clipboard: bool,

    /// Suppress the redaction summary.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

/// Subcommands for `rules`.
#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Lists rules grouped under their dividers.
    List,

    /// Adds a literal or regex rule.
    Add {
        #[arg(long, value_enum, default_value = "literal")]
        kind: KindArg,
        /// Text or pattern to find.
        #[arg(long)]
        find: String,
        /// Placeholder label.
        #[arg(long)]
        replace: String,
        #[arg(long)]
        note: Option<String>,
    },

    /// Adds a divider. A blank title is numbered automatically.
    Divider { title: Option<String> },

    /// Enables or disables a rule.
    Toggle { id: String },

    /// Changes a rule's find pattern and label.
    Update {
        id: String,
        #[arg(long)]
        find: String,
        #[arg(long)]
        replace: String,
    },

    /// Deletes a rule, with a short window to undo by pressing Enter.
    Delete {
        id: String,
        /// Delete immediately, without the undo window.
        #[arg(long, short = 'y')]
        yes: bool,
        /// Length of the undo window in seconds.
        #[arg(long, default_value_t = 5, value_name = "SECS")]
        undo_window: u64,
    },

    /// Moves a rule next to another rule.
    Move {
        id: String,
        /// Place the rule directly before this rule.
        #[arg(long, value_name = "TARGET", conflicts_with = "after", required_unless_present = "after")]
        before: Option<String>,
        /// Place the rule directly after this rule.
        #[arg(long, value_name = "TARGET")]
        after: Option<String>,
    },

    /// Moves a rule one position up.
    Up { id: String },

    /// Moves a rule one position down.
    Down { id: String },

    /// Imports a tab-separated (or legacy comma-separated) rule file.
    Import {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "merge")]
        mode: ModeArg,
    },

    /// Exports the rule list as tab-separated text.
    Export {
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replaces the rule list with the bundled master list.
    Reset,
}

/// Subcommands for `settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    Show,
    Set {
        /// Placeholder delimiters: [[..]], {{..}}, ((..)), <<..>> (or square, curly, round, angle).
        #[arg(long, value_name = "STYLE")]
        delimiter: Option<DelimiterStyle>,
        #[arg(long, value_name = "BOOL")]
        anywhere: Option<bool>,
        /// Button corner: top-left, top-right, bottom-left, bottom-right.
        #[arg(long, value_name = "POS")]
        position: Option<HoverPosition>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum KindArg {
    Literal,
    Regex,
}

impl From<KindArg> for RuleKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Literal => RuleKind::Literal,
            KindArg::Regex => RuleKind::Regex,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Discard existing rules.
    Replace,
    /// Update rules with the same pattern and append the rest.
    Merge,
}

impl From<ModeArg> for ImportMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Replace => ImportMode::Replace,
            ModeArg::Merge => ImportMode::Merge,
        }
    }
}

// redactx-core/src/lib.rs
//! # RedactX Core Library
//!
//! `redactx-core` provides the platform-independent logic behind RedactX: the
//! data model for user-defined redaction rules, the engine that turns text into
//! redacted text with stable placeholders, and the rule-set management that
//! edits, imports, exports and merges rule lists.
//!
//! ## Modules
//!
//! * `config`: `RedactionRule`, `RuleSet`, `Settings` and rule validation.
//! * `sanitizers`: compiles rules into matchers, skipping broken patterns.
//! * `placeholder`: call-scoped, per-label placeholder numbering.
//! * `engine`: the pure `redact` function.
//! * `manager`: add/toggle/update/delete/reorder and divider grouping.
//! * `transfer`: tab-separated import/export, legacy CSV import, merge policy.
//! * `master`: the bundled master rule list.
//! * `profiles`: the `RuleStore` storage collaborator and its implementations.
//! * `headless`: one-shot helpers that load a profile and redact.
//!
//! ## Usage Example
//!
//! ```rust
//! use redactx_core::{redact, RedactionRule, RuleKind, RuleSet, Settings};
//!
//! let rules = RuleSet::new(vec![
//!     RedactionRule::new(RuleKind::Literal, "John Doe", "REDACTED_NAME"),
//!     RedactionRule::new(RuleKind::Regex, r"\b\d{3}-\d{2}-\d{4}\b", "SSN"),
//! ]);
//! let out = redact(
//!     "John Doe's SSN is 123-45-6789, repeated: 123-45-6789",
//!     &rules,
//!     &Settings::default(),
//! );
//! assert_eq!(out, "[[REDACTED_NAME]]'s SSN is [[SSN-1]], repeated: [[SSN-1]]");
//! ```
//!
//! ## Error Handling
//!
//! Redaction never fails. Fallible operations (imports, manual adds, storage
//! writes) return [`RedactxError`].
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod manager;
pub mod master;
pub mod placeholder;
pub mod profiles;
pub mod redaction_match;
pub mod sanitizers;
pub mod transfer;

pub use config::{
    validate_candidate, DelimiterStyle, HoverPosition, NewRule, RedactionRule, RuleKind, RuleSet,
    Settings, MAX_NOTE_LENGTH,
};

pub use errors::RedactxError;

pub use engine::{redact, redact_with_summary, RedactionSummaryItem};

pub use placeholder::PlaceholderRegistry;

pub use manager::{
    add_rule, begin_delete, delete_rule, group_by_dividers, move_down, move_up, reorder,
    toggle_rule, undo_delete, update_rule, PendingDeletion, Placement, RuleGroup,
    DEFAULT_UNDO_WINDOW,
};

pub use transfer::{
    apply_import, export_tsv, parse_legacy_csv, parse_rules_file, parse_tsv, ImportMode,
    ImportSummary,
};

pub use master::{load_master_rules, load_master_rules_from};

pub use profiles::{
    commit_after_window, load_redaction_inputs, reset_to_master, DeletionOutcome, FileStore,
    MemoryStore, RuleStore,
};

pub use headless::{headless_redact, headless_redact_with_summary};

pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};

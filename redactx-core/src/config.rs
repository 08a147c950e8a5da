//! Configuration and data model for `redactx-core`.
//!
//! This module defines the core data structures for redaction rules, ordered rule
//! sets and the user settings consumed by the engine. It also carries the
//! validation applied to rules created by hand, before they reach a rule set.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::RedactxError;
use crate::sanitizers::compiler::check_pattern;

/// Maximum number of characters kept in a rule note on import.
pub const MAX_NOTE_LENGTH: usize = 255;

/// What a rule does when the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Exact substring match.
    Literal,
    /// Regular expression match with numbered placeholders.
    Regex,
    /// Organizational marker; never matches anything.
    Divider,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Literal => "literal",
            RuleKind::Regex => "regex",
            RuleKind::Divider => "divider",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = RedactxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(RuleKind::Literal),
            "regex" => Ok(RuleKind::Regex),
            "divider" => Ok(RuleKind::Divider),
            other => Err(RedactxError::InvalidRule(format!(
                "type must be 'literal', 'regex' or 'divider', got '{}'",
                other
            ))),
        }
    }
}

/// A single find/replace directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedactionRule {
    /// Opaque identifier, minted once and never reused.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Pattern to match, or the title of a divider.
    pub find: String,
    /// Label used to build the placeholder. Empty for dividers.
    #[serde(default)]
    pub replace: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl RedactionRule {
    /// Builds an enabled rule with a freshly minted id.
    pub fn new(kind: RuleKind, find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            id: mint_rule_id(),
            kind,
            find: find.into(),
            replace: replace.into(),
            enabled: true,
            note: None,
        }
    }

    /// Builds a divider with the given title.
    pub fn divider(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: mint_rule_id(),
            kind: RuleKind::Divider,
            find: title.clone(),
            replace: String::new(),
            enabled: true,
            note: Some(title),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_divider(&self) -> bool {
        self.kind == RuleKind::Divider
    }

    /// Display title of a divider: the note if set, otherwise `find`.
    pub fn title(&self) -> &str {
        match self.note.as_deref() {
            Some(note) if self.is_divider() && !note.is_empty() => note,
            _ => &self.find,
        }
    }
}

/// Mints a new rule id. Ids are random, so they are never reused.
pub fn mint_rule_id() -> String {
    format!("rule-{}", Uuid::new_v4())
}

/// Truncates a note to [`MAX_NOTE_LENGTH`] characters.
pub fn truncate_note(note: &str) -> String {
    note.chars().take(MAX_NOTE_LENGTH).collect()
}

/// An ordered sequence of rules. Order is meaningful for evaluation and display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<RedactionRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RedactionRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RedactionRule> {
        self.rules.iter()
    }

    pub fn get(&self, id: &str) -> Option<&RedactionRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.id == id)
    }

    pub fn divider_count(&self) -> usize {
        self.rules.iter().filter(|r| r.is_divider()).count()
    }
}

impl From<Vec<RedactionRule>> for RuleSet {
    fn from(rules: Vec<RedactionRule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RedactionRule;
    type IntoIter = std::slice::Iter<'a, RedactionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// The bracket pair used to render placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum DelimiterStyle {
    #[default]
    #[serde(rename = "[[..]]")]
    Square,
    #[serde(rename = "{{..}}")]
    Curly,
    #[serde(rename = "((..))")]
    Round,
    #[serde(rename = "<<..>>")]
    Angle,
}

impl DelimiterStyle {
    pub const ALL: [DelimiterStyle; 4] = [
        DelimiterStyle::Square,
        DelimiterStyle::Curly,
        DelimiterStyle::Round,
        DelimiterStyle::Angle,
    ];

    /// The style as shown to users, e.g. `[[..]]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DelimiterStyle::Square => "[[..]]",
            DelimiterStyle::Curly => "{{..}}",
            DelimiterStyle::Round => "((..))",
            DelimiterStyle::Angle => "<<..>>",
        }
    }

    /// First two characters of the style.
    pub fn open(&self) -> &'static str {
        &self.as_str()[..2]
    }

    /// Last two characters of the style.
    pub fn close(&self) -> &'static str {
        &self.as_str()[4..]
    }
}

impl fmt::Display for DelimiterStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelimiterStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "[[..]]" | "square" => Ok(DelimiterStyle::Square),
            "{{..}}" | "curly" => Ok(DelimiterStyle::Curly),
            "((..))" | "round" => Ok(DelimiterStyle::Round),
            "<<..>>" | "angle" => Ok(DelimiterStyle::Angle),
            other => Err(format!(
                "unknown delimiter style '{}'; expected one of [[..]], {{{{..}}}}, ((..)), <<..>>",
                other
            )),
        }
    }
}

/// Corner of an editable field where the redact button is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl HoverPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoverPosition::TopLeft => "top-left",
            HoverPosition::TopRight => "top-right",
            HoverPosition::BottomLeft => "bottom-left",
            HoverPosition::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for HoverPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoverPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top-left" => Ok(HoverPosition::TopLeft),
            "top-right" => Ok(HoverPosition::TopRight),
            "bottom-left" => Ok(HoverPosition::BottomLeft),
            "bottom-right" => Ok(HoverPosition::BottomRight),
            other => Err(format!("unknown button position '{}'", other)),
        }
    }
}

/// User settings. Only `delimiter_style` affects redaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub delimiter_style: DelimiterStyle,
    /// Show the redact button on every site, not only supported ones.
    pub use_anywhere_mode: bool,
    pub hover_area_position: HoverPosition,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter_style: DelimiterStyle::Square,
            use_anywhere_mode: true,
            hover_area_position: HoverPosition::BottomRight,
        }
    }
}

/// A rule as entered by a user, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    pub kind: RuleKind,
    pub find: String,
    pub replace: String,
    pub note: Option<String>,
}

impl NewRule {
    pub fn literal(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self { kind: RuleKind::Literal, find: find.into(), replace: replace.into(), note: None }
    }

    pub fn regex(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self { kind: RuleKind::Regex, find: find.into(), replace: replace.into(), note: None }
    }

    pub fn divider(title: impl Into<String>) -> Self {
        Self { kind: RuleKind::Divider, find: title.into(), replace: String::new(), note: None }
    }
}

/// Checks a hand-entered rule before it is added to a set.
///
/// Non-divider rules need a non-blank `find` and `replace`; regex rules must compile.
/// Dividers are always valid (an empty title is synthesized later).
pub fn validate_candidate(candidate: &NewRule) -> Result<(), RedactxError> {
    if candidate.kind == RuleKind::Divider {
        return Ok(());
    }
    if candidate.find.trim().is_empty() {
        return Err(RedactxError::InvalidRule("the find pattern must not be empty".to_string()));
    }
    if candidate.replace.trim().is_empty() {
        return Err(RedactxError::InvalidRule("the replacement label must not be empty".to_string()));
    }
    if candidate.kind == RuleKind::Regex {
        check_pattern(&candidate.find)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_style_splits_into_open_and_close() {
        for style in DelimiterStyle::ALL {
            let s = style.as_str();
            assert_eq!(style.open(), &s[..2]);
            assert_eq!(style.close(), &s[s.len() - 2..]);
        }
        assert_eq!(DelimiterStyle::Angle.open(), "<<");
        assert_eq!(DelimiterStyle::Curly.close(), "}}");
    }

    #[test]
    fn settings_deserialize_with_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"delimiter_style":"((..))"}"#).unwrap();
        assert_eq!(settings.delimiter_style, DelimiterStyle::Round);
        assert!(settings.use_anywhere_mode);
        assert_eq!(settings.hover_area_position, HoverPosition::BottomRight);
    }

    #[test]
    fn rule_kind_parses_case_insensitively() {
        assert_eq!("Regex".parse::<RuleKind>().unwrap(), RuleKind::Regex);
        assert!("bogus".parse::<RuleKind>().is_err());
    }

    #[test]
    fn validate_rejects_blank_and_broken_rules() {
        assert!(validate_candidate(&NewRule::literal("  ", "X")).is_err());
        assert!(validate_candidate(&NewRule::literal("Bob", "")).is_err());
        assert!(matches!(
            validate_candidate(&NewRule::regex("(", "Bad")),
            Err(RedactxError::RuleCompilationError(_, _))
        ));
        assert!(validate_candidate(&NewRule::divider("")).is_ok());
        assert!(validate_candidate(&NewRule::regex(r"\d+", "Num")).is_ok());
    }

    #[test]
    fn note_truncates_on_char_boundary() {
        let long: String = "é".repeat(300);
        let cut = truncate_note(&long);
        assert_eq!(cut.chars().count(), MAX_NOTE_LENGTH);
    }

    #[test]
    fn divider_title_prefers_note() {
        let mut d = RedactionRule::divider("Network");
        assert_eq!(d.title(), "Network");
        d.note = None;
        assert_eq!(d.title(), "Network");
    }
}

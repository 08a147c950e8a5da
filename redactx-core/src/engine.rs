// redactx-core/src/engine.rs
//! The redaction engine.
//!
//! [`redact`] is a pure function of its inputs: it compiles the given rules,
//! applies every literal rule first and every regex rule second, and returns
//! the transformed text. It never fails; rules that cannot be compiled are
//! skipped. All numbering state is created inside the call and dropped when
//! it returns.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::debug;
use regex::{Captures, NoExpand};

use crate::config::{RuleSet, Settings};
use crate::placeholder::PlaceholderRegistry;
use crate::redaction_match::loggable;
use crate::sanitizers::compiler::compile_rules;

/// What happened under one placeholder label during a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionSummaryItem {
    /// The rule's `replace` label.
    pub label: String,
    /// Number of replaced occurrences.
    pub occurrences: usize,
    /// Distinct placeholders emitted for this label, in first-seen order.
    pub placeholders: Vec<String>,
}

#[derive(Debug, Default)]
struct SummaryBuilder {
    items: Vec<RedactionSummaryItem>,
    index: HashMap<String, usize>,
}

impl SummaryBuilder {
    fn record(&mut self, label: &str, placeholder: &str, occurrences: usize) {
        let idx = match self.index.get(label) {
            Some(&i) => i,
            None => {
                self.items.push(RedactionSummaryItem {
                    label: label.to_string(),
                    occurrences: 0,
                    placeholders: Vec::new(),
                });
                self.index.insert(label.to_string(), self.items.len() - 1);
                self.items.len() - 1
            }
        };
        let item = &mut self.items[idx];
        item.occurrences += occurrences;
        if !item.placeholders.iter().any(|p| p == placeholder) {
            item.placeholders.push(placeholder.to_string());
        }
    }
}

/// Redacts `text` with `rules`, rendering placeholders in `settings.delimiter_style`.
pub fn redact(text: &str, rules: &RuleSet, settings: &Settings) -> String {
    redact_with_summary(text, rules, settings).0
}

/// Like [`redact`], and also reports per-label occurrence counts.
pub fn redact_with_summary(
    text: &str,
    rules: &RuleSet,
    settings: &Settings,
) -> (String, Vec<RedactionSummaryItem>) {
    let style = settings.delimiter_style;
    let compiled = compile_rules(rules);
    let mut summary = SummaryBuilder::default();
    let mut processed = text.to_string();

    for rule in &compiled.literals {
        let hits = rule.regex.find_iter(&processed).count();
        if hits == 0 {
            continue;
        }
        let placeholder = style.wrap(&rule.label);
        processed = rule
            .regex
            .replace_all(&processed, NoExpand(&placeholder))
            .into_owned();
        debug!("Literal rule '{}' replaced {} occurrence(s).", rule.rule_id, hits);
        summary.record(&rule.label, &placeholder, hits);
    }

    let mut registry = PlaceholderRegistry::new(style);
    for rule in &compiled.regexes {
        let mut hits = Vec::new();
        let replaced = rule.regex.replace_all(&processed, |caps: &Captures| {
            let matched = &caps[0];
            let (placeholder, fresh) = registry.resolve(&rule.label, matched);
            if fresh {
                debug!(
                    "Rule '{}' assigned {} to {}",
                    rule.rule_id,
                    placeholder,
                    loggable(matched)
                );
            }
            hits.push(placeholder.clone());
            placeholder
        });
        let replaced = replaced.into_owned();
        for placeholder in &hits {
            summary.record(&rule.label, placeholder, 1);
        }
        processed = replaced;
    }

    (processed, summary.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DelimiterStyle, RedactionRule, RuleKind};

    fn settings(style: DelimiterStyle) -> Settings {
        Settings { delimiter_style: style, ..Settings::default() }
    }

    #[test]
    fn literal_dollar_signs_are_not_expanded() {
        let rules = RuleSet::new(vec![RedactionRule::new(RuleKind::Literal, "cost", "$1")]);
        let out = redact("the cost", &rules, &Settings::default());
        assert_eq!(out, "the [[$1]]");
    }

    #[test]
    fn summary_counts_per_label() {
        let rules = RuleSet::new(vec![
            RedactionRule::new(RuleKind::Regex, r"\d{3}", "Num"),
            RedactionRule::new(RuleKind::Literal, "Ann", "Name"),
        ]);
        let (out, summary) =
            redact_with_summary("Ann 123 456 123 Ann", &rules, &settings(DelimiterStyle::Angle));
        assert_eq!(out, "<<Name>> <<Num-1>> <<Num-2>> <<Num-1>> <<Name>>");
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].label, "Name");
        assert_eq!(summary[0].occurrences, 2);
        assert_eq!(summary[1].occurrences, 3);
        assert_eq!(summary[1].placeholders, vec!["<<Num-1>>", "<<Num-2>>"]);
    }

    #[test]
    fn empty_text_and_empty_rules() {
        assert_eq!(redact("", &RuleSet::default(), &Settings::default()), "");
        assert_eq!(redact("abc", &RuleSet::default(), &Settings::default()), "abc");
    }
}

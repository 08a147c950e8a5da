//! compiler.rs - Turns a `RuleSet` into matchers the engine can apply.
//!
//! Rules are compiled per call and never cached across calls, so every
//! redaction runs against exactly the rules it was handed. Compilation is
//! lenient: a rule whose pattern cannot be built is logged and left out,
//! and the remaining rules still compile.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::config::{RedactionRule, RuleKind, RuleSet};
use crate::errors::RedactxError;

/// Upper bound on the compiled size of a single user pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Matches a JavaScript-style `/pattern/flags` literal with at least one flag.
/// Only treated as a literal when the flags include `g` or `y`; see [`check_pattern`].
static SLASH_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/(.+)/([gimsuy]+)$").expect("static pattern is valid"));

/// A single rule ready to be applied.
#[derive(Debug)]
pub struct CompiledRule {
    /// Matcher for the rule's `find`; literal rules are escaped first.
    pub regex: Regex,
    /// The placeholder label (`rule.replace`).
    pub label: String,
    /// Id of the source rule, for diagnostics.
    pub rule_id: String,
}

/// Enabled, non-divider rules split by kind, each in stored order.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub literals: Vec<CompiledRule>,
    pub regexes: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.literals.len() + self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compiles every enabled literal and regex rule in `rules`.
///
/// Empty patterns and patterns that fail to compile are skipped.
pub fn compile_rules(rules: &RuleSet) -> CompiledRules {
    let mut compiled = CompiledRules::default();

    for rule in rules.iter().filter(|r| r.enabled && !r.is_divider()) {
        if rule.find.is_empty() {
            debug!("Skipping rule '{}': empty find pattern.", rule.id);
            continue;
        }
        match compile_rule(rule) {
            Ok(c) => match rule.kind {
                RuleKind::Literal => compiled.literals.push(c),
                RuleKind::Regex => compiled.regexes.push(c),
                RuleKind::Divider => {}
            },
            Err(e) => {
                warn!("Skipping rule '{}' ({}): {}", rule.id, rule.kind, e);
            }
        }
    }

    debug!(
        "Compiled {} literal and {} regex rule(s) out of {}.",
        compiled.literals.len(),
        compiled.regexes.len(),
        rules.len()
    );
    compiled
}

fn compile_rule(rule: &RedactionRule) -> Result<CompiledRule, RedactxError> {
    let regex = match rule.kind {
        RuleKind::Literal => build(&regex::escape(&rule.find), "", &rule.find)?,
        _ => check_pattern(&rule.find)?,
    };
    Ok(CompiledRule {
        regex,
        label: rule.replace.clone(),
        rule_id: rule.id.clone(),
    })
}

/// Compiles a user-supplied regex pattern the same way the engine will.
///
/// A `/pattern/flags` form whose flags include `g` or `y` is unwrapped:
/// `i`, `m` and `s` map to the matching regex options, the rest are ignored
/// since matching is always global. Anything else, such as `/tmp/m`, is
/// compiled as written.
pub fn check_pattern(find: &str) -> Result<Regex, RedactxError> {
    match SLASH_LITERAL.captures(find) {
        Some(caps) if caps[2].contains(['g', 'y']) => build(&caps[1], &caps[2], find),
        _ => build(find, "", find),
    }
}

fn build(pattern: &str, flags: &str, original: &str) -> Result<Regex, RedactxError> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| RedactxError::RuleCompilationError(original.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_by_kind_and_keeps_order() {
        let set = RuleSet::new(vec![
            RedactionRule::new(RuleKind::Regex, r"\d+", "Num"),
            RedactionRule::divider("Group"),
            RedactionRule::new(RuleKind::Literal, "a.b", "A"),
            RedactionRule::new(RuleKind::Regex, r"[a-z]+", "Word"),
            RedactionRule::new(RuleKind::Literal, "c", "C").disabled(),
        ]);
        let compiled = compile_rules(&set);
        assert_eq!(compiled.literals.len(), 1);
        assert_eq!(compiled.regexes.len(), 2);
        assert_eq!(compiled.regexes[0].label, "Num");
        assert_eq!(compiled.regexes[1].label, "Word");
        // escaped: the dot is literal
        assert!(!compiled.literals[0].regex.is_match("axb"));
        assert!(compiled.literals[0].regex.is_match("a.b"));
    }

    #[test]
    fn invalid_and_empty_patterns_are_skipped() {
        let set = RuleSet::new(vec![
            RedactionRule::new(RuleKind::Regex, "(", "Bad"),
            RedactionRule::new(RuleKind::Literal, "", "Empty"),
            RedactionRule::new(RuleKind::Literal, "Bob", "Name"),
        ]);
        let compiled = compile_rules(&set);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled.literals[0].label, "Name");
    }

    #[test]
    fn slash_literal_flags_are_honoured() {
        let re = check_pattern("/secret/gi").unwrap();
        assert!(re.is_match("SECRET"));
        // no flags: left as a plain pattern
        let re = check_pattern("/usr/bin/").unwrap();
        assert!(re.is_match("/usr/bin/"));
    }

    #[test]
    fn path_like_patterns_without_global_flag_stay_plain() {
        let re = check_pattern("/tmp/m").unwrap();
        assert!(re.is_match("cd /tmp/m"));
        assert!(!re.is_match("tmp"));
        let re = check_pattern("/var/s").unwrap();
        assert_eq!(re.find("ls /var/s").map(|m| m.as_str()), Some("/var/s"));
    }
}

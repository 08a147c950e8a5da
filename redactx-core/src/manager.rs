// redactx-core/src/manager.rs
//! Rule-set management: the edits a user can make to an ordered rule list.
//!
//! All functions operate on an in-memory [`RuleSet`]; persisting the result is
//! the caller's job (see [`crate::profiles`]). Display order is free-form and
//! does not change evaluation order, which is always literals before regexes.
//!
//! License: MIT OR Apache-2.0

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::{validate_candidate, NewRule, RedactionRule, RuleKind, RuleSet};
use crate::errors::RedactxError;

/// Default undo window for a soft delete.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// Where to drop a rule relative to its target in [`reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Appends a hand-entered rule.
///
/// Rejects a literal/regex rule whose `find` exactly equals the `find` of an
/// existing literal/regex rule. The new rule gets a fresh id and is enabled.
pub fn add_rule<'a>(set: &'a mut RuleSet, candidate: NewRule) -> Result<&'a RedactionRule, RedactxError> {
    validate_candidate(&candidate)?;

    let rule = if candidate.kind == RuleKind::Divider {
        let title = if candidate.find.trim().is_empty() {
            format!("Divider {}", set.divider_count() + 1)
        } else {
            candidate.find
        };
        RedactionRule::divider(title)
    } else {
        if set.iter().any(|r| !r.is_divider() && r.find == candidate.find) {
            warn!("Rejected duplicate rule for pattern '{}'.", candidate.find);
            return Err(RedactxError::DuplicateFind(candidate.find));
        }
        let mut rule = RedactionRule::new(candidate.kind, candidate.find, candidate.replace);
        rule.note = candidate.note;
        rule
    };

    info!("Added {} rule '{}'.", rule.kind, rule.id);
    set.rules.push(rule);
    let last = set.rules.len() - 1;
    Ok(&set.rules[last])
}

/// Flips `enabled` on the rule with `id`. Returns `false` if there is no such rule.
pub fn toggle_rule(set: &mut RuleSet, id: &str) -> bool {
    match set.rules.iter_mut().find(|r| r.id == id) {
        Some(rule) => {
            rule.enabled = !rule.enabled;
            debug!("Rule '{}' is now {}.", id, if rule.enabled { "enabled" } else { "disabled" });
            true
        }
        None => false,
    }
}

/// Overwrites `find` and `replace` in place. No duplicate detection.
///
/// For a divider, `find` is the new title: it is written to `find` and `note`,
/// and `replace` stays empty.
pub fn update_rule(set: &mut RuleSet, id: &str, find: &str, replace: &str) -> bool {
    match set.rules.iter_mut().find(|r| r.id == id) {
        Some(rule) if rule.is_divider() => {
            rule.find = find.to_string();
            rule.note = Some(find.to_string());
            rule.replace.clear();
            true
        }
        Some(rule) => {
            rule.find = find.to_string();
            rule.replace = replace.to_string();
            true
        }
        None => false,
    }
}

/// Removes the rule with `id` immediately.
pub fn delete_rule(set: &mut RuleSet, id: &str) -> Option<RedactionRule> {
    let idx = set.position(id)?;
    Some(set.rules.remove(idx))
}

/// A soft-deleted rule waiting for its undo window to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub rule: RedactionRule,
    /// Index the rule had before removal.
    pub index: usize,
    pub deadline: Instant,
}

impl PendingDeletion {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// Removes a rule from the in-memory view and returns the pending deletion.
///
/// Storage is not touched; see [`crate::profiles::commit_after_window`].
pub fn begin_delete(set: &mut RuleSet, id: &str, window: Duration) -> Option<PendingDeletion> {
    let index = set.position(id)?;
    let rule = set.rules.remove(index);
    Some(PendingDeletion {
        rule,
        index,
        deadline: Instant::now() + window,
    })
}

/// Puts a soft-deleted rule back at its original index.
pub fn undo_delete(set: &mut RuleSet, pending: PendingDeletion) {
    let index = pending.index.min(set.rules.len());
    set.rules.insert(index, pending.rule);
}

/// Moves the rule `id` to sit immediately before or after `target_id`.
///
/// Returns `false` (and leaves the set unchanged) if either id is missing or
/// both are the same.
pub fn reorder(set: &mut RuleSet, id: &str, target_id: &str, placement: Placement) -> bool {
    if id == target_id || set.position(target_id).is_none() {
        return false;
    }
    let Some(from) = set.position(id) else {
        return false;
    };
    let rule = set.rules.remove(from);
    // target index shifts after removal, so look it up again
    let Some(target) = set.position(target_id) else {
        set.rules.insert(from, rule);
        return false;
    };
    let to = match placement {
        Placement::Before => target,
        Placement::After => target + 1,
    };
    set.rules.insert(to, rule);
    true
}

/// Swaps the rule with its predecessor. `false` if already first or absent.
pub fn move_up(set: &mut RuleSet, id: &str) -> bool {
    match set.position(id) {
        Some(idx) if idx > 0 => {
            set.rules.swap(idx, idx - 1);
            true
        }
        _ => false,
    }
}

/// Swaps the rule with its successor. `false` if already last or absent.
pub fn move_down(set: &mut RuleSet, id: &str) -> bool {
    match set.position(id) {
        Some(idx) if idx + 1 < set.rules.len() => {
            set.rules.swap(idx, idx + 1);
            true
        }
        _ => false,
    }
}

/// A divider and the rules that follow it, up to the next divider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup<'a> {
    /// `None` for rules that precede every divider.
    pub divider: Option<&'a RedactionRule>,
    pub rules: Vec<&'a RedactionRule>,
}

impl RuleGroup<'_> {
    pub fn title(&self) -> &str {
        self.divider.map_or("Ungrouped", |d| d.title())
    }

    pub fn count(&self) -> usize {
        self.rules.len()
    }
}

/// Groups rules under the nearest preceding divider, for display.
///
/// The leading ungrouped group is only present when it has rules; every
/// divider yields a group, even an empty one.
pub fn group_by_dividers(set: &RuleSet) -> Vec<RuleGroup<'_>> {
    let mut groups = vec![RuleGroup { divider: None, rules: Vec::new() }];
    for rule in set {
        if rule.is_divider() {
            groups.push(RuleGroup { divider: Some(rule), rules: Vec::new() });
        } else if let Some(current) = groups.last_mut() {
            current.rules.push(rule);
        }
    }
    if groups[0].rules.is_empty() {
        groups.remove(0);
    }
    groups
}

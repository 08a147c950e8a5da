// redactx-core/src/placeholder.rs
//! Placeholder synthesis.
//!
//! A [`PlaceholderRegistry`] lives for exactly one redaction call. It hands out
//! numbered placeholders per label, so two distinct SSNs become `SSN-1` and
//! `SSN-2` while a repeated SSN keeps its first number.

use std::collections::HashMap;

use crate::config::DelimiterStyle;

impl DelimiterStyle {
    /// Wraps `label` in this style's brackets.
    pub fn wrap(&self, label: &str) -> String {
        format!("{}{}{}", self.open(), label, self.close())
    }

    /// Builds the numbered placeholder `open + label-counter + close`.
    pub fn numbered(&self, label: &str, counter: u32) -> String {
        format!("{}{}-{}{}", self.open(), label, counter, self.close())
    }
}

/// Call-scoped mapping from matched text to placeholder, numbered per label.
#[derive(Debug)]
pub struct PlaceholderRegistry {
    style: DelimiterStyle,
    counters: HashMap<String, u32>,
    assigned: HashMap<(String, String), String>,
}

impl PlaceholderRegistry {
    pub fn new(style: DelimiterStyle) -> Self {
        Self {
            style,
            counters: HashMap::new(),
            assigned: HashMap::new(),
        }
    }

    /// Returns the placeholder for `matched` under `label`, minting one if needed.
    ///
    /// The second element is `true` when the placeholder was newly minted.
    pub fn resolve(&mut self, label: &str, matched: &str) -> (String, bool) {
        let key = (label.to_string(), matched.to_string());
        if let Some(existing) = self.assigned.get(&key) {
            return (existing.clone(), false);
        }
        let counter = self.counters.entry(label.to_string()).or_insert(0);
        *counter += 1;
        let placeholder = self.style.numbered(label, *counter);
        self.assigned.insert(key, placeholder.clone());
        (placeholder, true)
    }

    /// Number of placeholders minted so far for `label`.
    pub fn count_for(&self, label: &str) -> u32 {
        self.counters.get(label).copied().unwrap_or(0)
    }
}

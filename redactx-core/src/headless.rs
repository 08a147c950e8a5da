// redactx-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot redaction without any UI.
//!
//! These load the profile's rules and settings from a [`RuleStore`] (both reads
//! run concurrently) and pass them to the engine.

use crate::engine::{redact, redact_with_summary, RedactionSummaryItem};
use crate::profiles::{load_redaction_inputs, RuleStore};

/// Redacts `content` with the rules and settings currently held by `store`.
pub async fn headless_redact(store: &dyn RuleStore, content: &str) -> String {
    let (rules, settings) = load_redaction_inputs(store).await;
    redact(content, &rules, &settings)
}

/// Like [`headless_redact`], also returning the per-label summary.
pub async fn headless_redact_with_summary(
    store: &dyn RuleStore,
    content: &str,
) -> (String, Vec<RedactionSummaryItem>) {
    let (rules, settings) = load_redaction_inputs(store).await;
    redact_with_summary(content, &rules, &settings)
}

// redactx-core/src/redaction_match.rs
//! Helpers that keep matched sensitive text out of debug logs.

use once_cell::sync::Lazy;

/// Initialized once: whether matched text may appear verbatim in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("REDACTX_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

/// Masks a sensitive string, keeping only its length for longer values.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

/// Returns `s` itself if PII debugging is allowed, otherwise a masked form.
pub fn loggable(s: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        s.to_string()
    } else {
        redact_sensitive(s)
    }
}

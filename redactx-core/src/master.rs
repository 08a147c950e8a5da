// redactx-core/src/master.rs
//! The master rule list: a read-only tab-separated resource used to seed or
//! reset a profile. It is parsed with the same grammar as user imports.

use std::path::Path;

use log::{debug, error, warn};

use crate::config::RuleSet;
use crate::transfer::parse_tsv;

/// The master list bundled with the library.
pub const MASTER_RULES_TSV: &str = include_str!("../config/master_rules.tsv");

/// Parses the bundled master list. Yields an empty set if it cannot be parsed.
pub fn load_master_rules() -> RuleSet {
    match parse_tsv(MASTER_RULES_TSV) {
        Ok(rules) => {
            debug!("Loaded {} master rule(s).", rules.len());
            rules
        }
        Err(e) => {
            error!("Bundled master rule list is invalid: {}", e);
            RuleSet::default()
        }
    }
}

/// Reads and parses an external master list. Read or parse failures yield an
/// empty set.
pub fn load_master_rules_from<P: AsRef<Path>>(path: P) -> RuleSet {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            warn!("Failed to read master list {}: {}", path.display(), e);
            return RuleSet::default();
        }
    };
    parse_tsv(&text).unwrap_or_else(|e| {
        warn!("Failed to parse master list {}: {}", path.display(), e);
        RuleSet::default()
    })
}

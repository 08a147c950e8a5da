// redactx-core/src/transfer.rs
//! Import and export of rule sets as tab-separated text.
//!
//! The format is one header row (`type`, `find`, `replace`, `Active`, `Note`)
//! followed by one row per rule. It has no quoting mechanism: on export, tabs
//! and line breaks inside fields are flattened to spaces. On import, a matched
//! pair of surrounding double quotes is stripped from `find`, `replace` and
//! `note`.
//!
//! Imports are all-or-nothing: any malformed row aborts the whole parse with
//! the row's line number, so nothing half-parsed ever reaches storage. The
//! older comma-separated `type,find,replace` export is still readable through
//! [`parse_legacy_csv`].
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;

use log::{debug, info};

use crate::config::{mint_rule_id, truncate_note, RedactionRule, RuleKind, RuleSet};
use crate::errors::RedactxError;
use crate::sanitizers::compiler::check_pattern;

/// Column titles written on export.
pub const TSV_HEADER: [&str; 5] = ["type", "find", "replace", "Active", "Note"];

const BOM: char = '\u{feff}';
const MAX_COLUMNS: usize = 5;

/// How an imported set is combined with the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// The imported set wholly supersedes the existing set.
    Replace,
    /// Existing rules with a matching `find` are updated; the rest are appended.
    #[default]
    Merge,
}

/// Counts reported back to the user after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Literal/regex rules appended as new entries.
    pub added: usize,
    /// Existing rules overwritten in place.
    pub updated: usize,
    /// Dividers appended.
    pub dividers: usize,
    /// Size of the resulting set.
    pub total: usize,
}

/// Renders `set` as tab-separated text with a header row.
pub fn export_tsv(set: &RuleSet) -> String {
    let mut out = TSV_HEADER.join("\t");
    out.push('\n');
    for rule in set {
        let active = if rule.enabled { "Y" } else { "N" };
        let row = if rule.is_divider() {
            [rule.kind.as_str(), "", "", active, rule.title()].map(flatten)
        } else {
            [
                rule.kind.as_str(),
                rule.find.as_str(),
                rule.replace.as_str(),
                active,
                rule.note.as_deref().unwrap_or(""),
            ]
            .map(flatten)
        };
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    debug!("Exported {} rule(s).", set.len());
    out
}

fn flatten(field: &str) -> String {
    field.replace(['\t', '\r', '\n'], " ")
}

/// Strips one matched pair of surrounding double quotes.
fn unquote(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields.len() >= 2
        && fields[0].trim().eq_ignore_ascii_case("type")
        && fields[1].trim().eq_ignore_ascii_case("find")
}

/// Parses tab-separated rule text.
///
/// Every returned rule has a freshly minted id. Errors carry the 1-based line
/// number of the offending row.
pub fn parse_tsv(text: &str) -> Result<RuleSet, RedactxError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rules = Vec::new();
    let mut dividers = 0usize;
    let mut seen_row = false;

    for (idx, raw) in text.split('\n').enumerate() {
        let row = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if !seen_row {
            seen_row = true;
            if is_header(&fields) {
                continue;
            }
        }
        if fields.len() > MAX_COLUMNS {
            return Err(RedactxError::row(
                row,
                format!("expected at most {} tab-separated columns, found {}", MAX_COLUMNS, fields.len()),
            ));
        }

        let field = |i: usize| fields.get(i).copied().unwrap_or("");
        let kind: RuleKind = field(0)
            .parse()
            .map_err(|e: RedactxError| RedactxError::row(row, e.to_string()))?;
        let find = unquote(field(1));
        let replace = unquote(field(2));
        let active = field(3).trim();
        let enabled = active.is_empty() || active == "Y";
        let note = unquote(field(4));
        let note = (!note.is_empty()).then(|| truncate_note(note));

        let rule = match kind {
            RuleKind::Divider => {
                dividers += 1;
                let title = note.unwrap_or_else(|| format!("Divider {}", dividers));
                RedactionRule::divider(title)
            }
            RuleKind::Literal | RuleKind::Regex => {
                if find.is_empty() {
                    return Err(RedactxError::row(row, "the find column must not be empty"));
                }
                if kind == RuleKind::Regex {
                    if let Err(e) = check_pattern(find) {
                        return Err(RedactxError::row(row, format!("invalid regex: {}", e)));
                    }
                }
                RedactionRule {
                    id: mint_rule_id(),
                    kind,
                    find: find.to_string(),
                    replace: replace.to_string(),
                    enabled,
                    note,
                }
            }
        };
        rules.push(RedactionRule { enabled, ..rule });
    }

    if rules.is_empty() {
        return Err(RedactxError::EmptyImport);
    }
    info!("Parsed {} rule(s) from tab-separated input.", rules.len());
    Ok(RuleSet::new(rules))
}

/// Parses the legacy `type,find,replace` comma-separated export.
///
/// Fields may be double-quoted with `""` escapes. Every column must be
/// non-empty; only `literal` and `regex` rows exist in this format, and every
/// rule is imported enabled.
pub fn parse_legacy_csv(text: &str) -> Result<RuleSet, RedactxError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rules = Vec::new();
    let mut header_checked = false;

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            let row = e.position().map_or(idx + 1, |p| p.line() as usize);
            RedactxError::row(row, format!("malformed CSV: {}", e))
        })?;
        let row = record.position().map_or(idx + 1, |p| p.line() as usize);

        if !header_checked {
            header_checked = true;
            let header: Vec<String> = record.iter().map(str::to_lowercase).collect();
            if header != ["type", "find", "replace"] {
                return Err(RedactxError::row(
                    row,
                    format!("expected header 'type,find,replace' but got '{}'", header.join(",")),
                ));
            }
            continue;
        }

        if record.len() != 3 {
            return Err(RedactxError::row(row, format!("expected 3 columns but found {}", record.len())));
        }
        let (kind, find, replace) = (&record[0], &record[1], &record[2]);
        if kind.is_empty() || find.is_empty() || replace.is_empty() {
            return Err(RedactxError::row(row, "all columns must have values"));
        }
        let kind = match kind {
            "literal" => RuleKind::Literal,
            "regex" => RuleKind::Regex,
            other => {
                return Err(RedactxError::row(
                    row,
                    format!("type must be 'literal' or 'regex', got '{}'", other),
                ))
            }
        };
        if kind == RuleKind::Regex {
            if let Err(e) = check_pattern(find) {
                return Err(RedactxError::row(row, format!("invalid regex: {}", e)));
            }
        }
        rules.push(RedactionRule::new(kind, find, replace));
    }

    if rules.is_empty() {
        return Err(RedactxError::EmptyImport);
    }
    info!("Parsed {} rule(s) from legacy CSV input.", rules.len());
    Ok(RuleSet::new(rules))
}

/// Parses either format, picking legacy CSV only for a `type,find,replace` header.
pub fn parse_rules_file(text: &str) -> Result<RuleSet, RedactxError> {
    let body = text.strip_prefix(BOM).unwrap_or(text);
    let first = body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if !first.contains('\t') && first.eq_ignore_ascii_case("type,find,replace") {
        debug!("Detected legacy CSV rule file.");
        parse_legacy_csv(body)
    } else {
        parse_tsv(body)
    }
}

/// Combines `imported` into `existing` according to `mode`.
pub fn apply_import(existing: &mut RuleSet, imported: RuleSet, mode: ImportMode) -> ImportSummary {
    let mut summary = ImportSummary::default();

    match mode {
        ImportMode::Replace => {
            summary.dividers = imported.divider_count();
            summary.added = imported.len() - summary.dividers;
            *existing = imported;
        }
        ImportMode::Merge => {
            let mut lookup: HashMap<String, usize> = HashMap::new();
            for (idx, rule) in existing.rules.iter().enumerate() {
                if !rule.is_divider() {
                    lookup.entry(rule.find.clone()).or_insert(idx);
                }
            }

            for mut rule in imported.rules {
                if rule.is_divider() {
                    rule.id = mint_rule_id();
                    existing.rules.push(rule);
                    summary.dividers += 1;
                    continue;
                }
                match lookup.get(&rule.find).copied() {
                    Some(idx) => {
                        let slot = &mut existing.rules[idx];
                        rule.id = std::mem::take(&mut slot.id);
                        *slot = rule;
                        summary.updated += 1;
                    }
                    None => {
                        rule.id = mint_rule_id();
                        lookup.insert(rule.find.clone(), existing.rules.len());
                        existing.rules.push(rule);
                        summary.added += 1;
                    }
                }
            }
        }
    }

    summary.total = existing.len();
    info!(
        "Import ({:?}): {} added, {} updated, {} divider(s); {} rule(s) total.",
        mode, summary.added, summary.updated, summary.dividers, summary.total
    );
    summary
}

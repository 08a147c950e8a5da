// redactx-core/tests/transfer_tests.rs
use redactx_core::{
    apply_import, export_tsv, parse_legacy_csv, parse_rules_file, parse_tsv, ImportMode,
    RedactionRule, RedactxError, RuleKind, RuleSet, MAX_NOTE_LENGTH,
};

fn row_of(err: RedactxError) -> usize {
    match err {
        RedactxError::InvalidRow { row, .. } => row,
        other => panic!("expected a row error, got {:?}", other),
    }
}

#[test_log::test]
fn test_parse_full_tsv_with_bom_comments_and_quotes() {
    let text = "\u{feff}type\tfind\treplace\tActive\tNote\n\
                # a comment\n\
                divider\t\t\tY\tPeople\n\
                literal\t\"John Doe\"\t\"Name\"\tY\t\"who\"\n\
                \n\
                regex\t\\d{3}\tNum\tN\t\n";
    let set = parse_tsv(text).unwrap();
    assert_eq!(set.len(), 3);

    let divider = &set.rules[0];
    assert!(divider.is_divider());
    assert_eq!(divider.title(), "People");

    let literal = &set.rules[1];
    assert_eq!(literal.kind, RuleKind::Literal);
    assert_eq!(literal.find, "John Doe");
    assert_eq!(literal.replace, "Name");
    assert_eq!(literal.note.as_deref(), Some("who"));
    assert!(literal.enabled);

    let regex = &set.rules[2];
    assert_eq!(regex.kind, RuleKind::Regex);
    assert!(!regex.enabled);
    assert_eq!(regex.note, None);
}

#[test]
fn test_parse_without_header_and_crlf() {
    let set = parse_tsv("literal\tBob\tName\r\nregex\t\\d+\tNum\r\n").unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.rules[0].replace, "Name");
    assert_eq!(set.rules[1].find, "\\d+");
}

#[test]
fn test_missing_trailing_columns_default_to_enabled() {
    let set = parse_tsv("literal\tBob\tName").unwrap();
    assert!(set.rules[0].enabled);
    assert_eq!(set.rules[0].note, None);
}

#[test]
fn test_type_is_case_insensitive() {
    let set = parse_tsv("LITERAL\tBob\tName\nRegex\tx\tX\n").unwrap();
    assert_eq!(set.rules[0].kind, RuleKind::Literal);
    assert_eq!(set.rules[1].kind, RuleKind::Regex);
}

#[test]
fn test_every_imported_rule_gets_a_fresh_id() {
    let set = parse_tsv("literal\ta\tA\nliteral\tb\tB\n").unwrap();
    let again = parse_tsv("literal\ta\tA\nliteral\tb\tB\n").unwrap();
    assert_ne!(set.rules[0].id, set.rules[1].id);
    assert_ne!(set.rules[0].id, again.rules[0].id);
}

#[test]
fn test_unknown_type_reports_row() {
    let err = parse_tsv("type\tfind\treplace\nliteral\ta\tA\nbogus\tb\tB\n").unwrap_err();
    assert_eq!(row_of(err), 3);
}

#[test]
fn test_too_many_columns_reports_row() {
    let err = parse_tsv("literal\ta\tA\tY\tnote\textra\n").unwrap_err();
    assert_eq!(row_of(err), 1);
}

#[test]
fn test_empty_find_is_rejected() {
    let err = parse_tsv("literal\ta\tA\nregex\t\tB\n").unwrap_err();
    assert_eq!(row_of(err), 2);
}

#[test]
fn test_invalid_regex_aborts_whole_import() {
    let err = parse_tsv("literal\ta\tA\nregex\t(\tBad\n").unwrap_err();
    assert_eq!(row_of(err), 2);
    assert!(err_text("literal\ta\tA\nregex\t(\tBad\n").contains("invalid regex"));
}

fn err_text(text: &str) -> String {
    parse_tsv(text).unwrap_err().to_string()
}

#[test]
fn test_header_only_or_blank_input_is_empty_import() {
    assert!(matches!(parse_tsv(""), Err(RedactxError::EmptyImport)));
    assert!(matches!(
        parse_tsv("type\tfind\treplace\tActive\tNote\n# nothing\n"),
        Err(RedactxError::EmptyImport)
    ));
}

#[test]
fn test_divider_without_title_is_numbered() {
    let set = parse_tsv("divider\t\t\tY\t\nliteral\ta\tA\ndivider\t\t\t\t\n").unwrap();
    assert_eq!(set.rules[0].title(), "Divider 1");
    assert_eq!(set.rules[2].title(), "Divider 2");
}

#[test]
fn test_note_is_truncated() {
    let long = "n".repeat(MAX_NOTE_LENGTH + 40);
    let set = parse_tsv(&format!("literal\ta\tA\tY\t{}\n", long)).unwrap();
    assert_eq!(set.rules[0].note.as_ref().map(|n| n.chars().count()), Some(MAX_NOTE_LENGTH));
}

#[test]
fn test_export_writes_header_and_flattens_fields() {
    let set = RuleSet::new(vec![
        RedactionRule::divider("Group"),
        RedactionRule::new(RuleKind::Literal, "a\tb", "A\nB").with_note("x\r\ny"),
        RedactionRule::new(RuleKind::Regex, r"\d+", "Num").disabled(),
    ]);
    let out = export_tsv(&set);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "type\tfind\treplace\tActive\tNote");
    assert_eq!(lines[1], "divider\t\t\tY\tGroup");
    assert_eq!(lines[2], "literal\ta b\tA B\tY\tx  y");
    assert_eq!(lines[3], "regex\t\\d+\tNum\tN\t");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_export_then_import_preserves_content() {
    let set = RuleSet::new(vec![
        RedactionRule::divider("Group"),
        RedactionRule::new(RuleKind::Literal, "Bob", "Name").with_note("friend"),
        RedactionRule::new(RuleKind::Regex, r"\b\d{3}\b", "Num").disabled(),
    ]);
    let back = parse_tsv(&export_tsv(&set)).unwrap();
    assert_eq!(back.len(), set.len());
    for (a, b) in set.iter().zip(back.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.title(), b.title());
        assert_eq!(a.enabled, b.enabled);
        if !a.is_divider() {
            assert_eq!(a.find, b.find);
            assert_eq!(a.replace, b.replace);
            assert_eq!(a.note, b.note);
        }
    }
}

#[test]
fn test_legacy_csv_import() {
    let text = "type,find,replace\nliteral,John Doe,Name\nregex,\"\\d{3},\\d{3}\",Num\n";
    let set = parse_legacy_csv(text).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.rules[1].find, "\\d{3},\\d{3}");
    assert!(set.iter().all(|r| r.enabled));
}

#[test]
fn test_legacy_csv_rejects_bad_rows() {
    assert_eq!(row_of(parse_legacy_csv("find,type,replace\nliteral,a,A\n").unwrap_err()), 1);
    assert_eq!(row_of(parse_legacy_csv("type,find,replace\nliteral,a\n").unwrap_err()), 2);
    assert_eq!(row_of(parse_legacy_csv("type,find,replace\nliteral,,A\n").unwrap_err()), 2);
    assert_eq!(row_of(parse_legacy_csv("type,find,replace\ndivider,a,A\n").unwrap_err()), 2);
    assert!(matches!(parse_legacy_csv("type,find,replace\n"), Err(RedactxError::EmptyImport)));
}

#[test]
fn test_format_detection() {
    let csv = parse_rules_file("type,find,replace\nliteral,a,A\n").unwrap();
    assert_eq!(csv.rules[0].find, "a");
    let tsv = parse_rules_file("type\tfind\treplace\nliteral\ta,b\tA\n").unwrap();
    assert_eq!(tsv.rules[0].find, "a,b");
}

#[test_log::test]
fn test_merge_updates_in_place_and_appends_new() {
    let mut existing = RuleSet::new(vec![
        RedactionRule::new(RuleKind::Literal, "Bob", "Name"),
        RedactionRule::divider("Numbers"),
        RedactionRule::new(RuleKind::Regex, r"\d+", "Num"),
    ]);
    let bob_id = existing.rules[0].id.clone();
    let imported = parse_tsv(
        "literal\tBob\tPerson\tN\tupdated\n\
         divider\t\t\tY\tMore\n\
         literal\tAlice\tName\n\
         literal\tAlice\tFriend\n",
    )
    .unwrap();

    let summary = apply_import(&mut existing, imported, ImportMode::Merge);

    assert_eq!(existing.rules[0].id, bob_id);
    assert_eq!(existing.rules[0].replace, "Person");
    assert!(!existing.rules[0].enabled);
    assert_eq!(existing.rules[0].note.as_deref(), Some("updated"));
    assert_eq!(existing.rules[3].title(), "More");
    // the later duplicate within the file overwrites the first
    assert_eq!(existing.rules[4].find, "Alice");
    assert_eq!(existing.rules[4].replace, "Friend");
    assert_eq!(existing.len(), 5);

    assert_eq!(summary.added, 1);
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.dividers, 1);
    assert_eq!(summary.total, 5);
}

#[test]
fn test_merge_never_matches_dividers_by_title() {
    let mut existing = RuleSet::new(vec![RedactionRule::divider("Bob")]);
    let imported = parse_tsv("literal\tBob\tName\ndivider\t\t\tY\tBob\n").unwrap();
    let summary = apply_import(&mut existing, imported, ImportMode::Merge);
    assert_eq!(existing.len(), 3);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.dividers, 1);
}

#[test]
fn test_replace_supersedes_existing() {
    let mut existing = RuleSet::new(vec![RedactionRule::new(RuleKind::Literal, "Bob", "Name")]);
    let imported = parse_tsv("divider\t\t\tY\tG\nliteral\tAlice\tName\n").unwrap();
    let summary = apply_import(&mut existing, imported, ImportMode::Replace);
    assert_eq!(existing.len(), 2);
    assert_eq!(existing.rules[1].find, "Alice");
    assert_eq!(summary.added, 1);
    assert_eq!(summary.dividers, 1);
    assert_eq!(summary.updated, 0);
}

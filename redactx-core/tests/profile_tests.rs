// redactx-core/tests/profile_tests.rs
use std::time::Duration;

use redactx_core::{
    begin_delete, commit_after_window, headless_redact, load_master_rules, load_redaction_inputs,
    reset_to_master, DeletionOutcome, DelimiterStyle, FileStore, HoverPosition, MemoryStore,
    RedactionRule, RuleKind, RuleSet, RuleStore, Settings,
};
use tempfile::tempdir;
use tokio::sync::oneshot;

const SHORT_WINDOW: Duration = Duration::from_millis(50);

fn sample_rules() -> RuleSet {
    RuleSet::new(vec![
        RedactionRule::divider("People"),
        RedactionRule::new(RuleKind::Literal, "Bob", "Name"),
        RedactionRule::new(RuleKind::Regex, r"\d+", "Num").disabled(),
    ])
}

/// Master-list ids are minted per load, so compare content only.
fn shape(set: &RuleSet) -> Vec<(RuleKind, String, String, bool)> {
    set.iter()
        .map(|r| (r.kind, r.find.clone(), r.replace.clone(), r.enabled))
        .collect()
}

#[test_log::test(tokio::test)]
async fn test_file_store_round_trip() {
    let root = tempdir().unwrap();
    let store = FileStore::new(root.path(), "work");
    let rules = sample_rules();
    let settings = Settings {
        delimiter_style: DelimiterStyle::Angle,
        use_anywhere_mode: false,
        hover_area_position: HoverPosition::TopLeft,
    };

    store.save_rule_set(&rules).await.unwrap();
    store.save_settings(&settings).await.unwrap();

    let reopened = FileStore::new(root.path(), "work");
    assert_eq!(reopened.get_rule_set().await, rules);
    assert_eq!(reopened.get_settings().await, settings);
    assert!(root.path().join("work").join("rules.json").exists());
    assert!(!root.path().join("work").join("rules.json.tmp").exists());
}

#[tokio::test]
async fn test_missing_profile_yields_defaults() {
    let root = tempdir().unwrap();
    let store = FileStore::new(root.path(), "fresh");
    assert_eq!(shape(&store.get_rule_set().await), shape(&load_master_rules()));
    assert_eq!(store.get_settings().await, Settings::default());
}

#[tokio::test]
async fn test_profiles_are_isolated() {
    let root = tempdir().unwrap();
    let work = FileStore::new(root.path(), "work");
    let home = FileStore::new(root.path(), "home");
    work.save_rule_set(&sample_rules()).await.unwrap();

    assert_eq!(work.get_rule_set().await.len(), 3);
    assert_eq!(shape(&home.get_rule_set().await), shape(&load_master_rules()));
}

#[test_log::test(tokio::test)]
async fn test_corrupt_files_fall_back_to_defaults() {
    let root = tempdir().unwrap();
    let dir = root.path().join("broken");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("rules.json"), "{ not json").unwrap();
    std::fs::write(dir.join("settings.json"), "[1, 2, 3]").unwrap();

    let store = FileStore::new(root.path(), "broken");
    assert_eq!(shape(&store.get_rule_set().await), shape(&load_master_rules()));
    assert_eq!(store.get_settings().await, Settings::default());
}

#[tokio::test]
async fn test_partial_settings_fill_in_defaults() {
    let root = tempdir().unwrap();
    let dir = root.path().join("partial");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("settings.json"), r#"{"delimiter_style":"{{..}}"}"#).unwrap();

    let settings = FileStore::new(root.path(), "partial").get_settings().await;
    assert_eq!(settings.delimiter_style, DelimiterStyle::Curly);
    assert!(settings.use_anywhere_mode);
    assert_eq!(settings.hover_area_position, HoverPosition::BottomRight);
}

#[tokio::test]
async fn test_load_inputs_and_headless_redact() {
    let store = MemoryStore::with_contents(
        sample_rules(),
        Settings { delimiter_style: DelimiterStyle::Curly, ..Settings::default() },
    );
    let (rules, settings) = load_redaction_inputs(&store).await;
    assert_eq!(rules.len(), 3);
    assert_eq!(settings.delimiter_style, DelimiterStyle::Curly);
    // the regex rule is disabled
    assert_eq!(headless_redact(&store, "Bob 42").await, "{{Name}} 42");
}

#[tokio::test]
async fn test_reset_to_master_overwrites_rules() {
    let store = MemoryStore::with_contents(sample_rules(), Settings::default());
    let master = reset_to_master(&store).await.unwrap();
    assert_eq!(store.get_rule_set().await, master);
    assert_eq!(shape(&master), shape(&load_master_rules()));
}

#[test_log::test(tokio::test)]
async fn test_soft_delete_commits_after_window() {
    let store = MemoryStore::with_contents(sample_rules(), Settings::default());
    let mut view = store.get_rule_set().await;
    let id = view.rules[1].id.clone();

    let pending = begin_delete(&mut view, &id, SHORT_WINDOW).unwrap();
    // still stored until the window elapses
    assert_eq!(store.get_rule_set().await.len(), 3);

    let (_undo_tx, undo_rx) = oneshot::channel();
    let outcome = commit_after_window(&store, &pending, undo_rx).await.unwrap();
    assert_eq!(outcome, DeletionOutcome::Committed);

    let stored = store.get_rule_set().await;
    assert_eq!(stored.len(), 2);
    assert!(stored.get(&id).is_none());
}

#[tokio::test]
async fn test_soft_delete_undo_leaves_storage_untouched() {
    let store = MemoryStore::with_contents(sample_rules(), Settings::default());
    let mut view = store.get_rule_set().await;
    let id = view.rules[1].id.clone();
    let pending = begin_delete(&mut view, &id, Duration::from_secs(30)).unwrap();

    let (undo_tx, undo_rx) = oneshot::channel();
    undo_tx.send(()).unwrap();
    let outcome = commit_after_window(&store, &pending, undo_rx).await.unwrap();

    assert_eq!(outcome, DeletionOutcome::Undone);
    let stored = store.get_rule_set().await;
    assert_eq!(stored.len(), 3);
    assert_eq!(stored.position(&id), Some(1));
}

#[tokio::test]
async fn test_dropped_undo_handle_still_commits() {
    let store = MemoryStore::with_contents(sample_rules(), Settings::default());
    let mut view = store.get_rule_set().await;
    let id = view.rules[0].id.clone();
    let pending = begin_delete(&mut view, &id, SHORT_WINDOW).unwrap();

    let (undo_tx, undo_rx) = oneshot::channel::<()>();
    drop(undo_tx);
    let outcome = commit_after_window(&store, &pending, undo_rx).await.unwrap();

    assert_eq!(outcome, DeletionOutcome::Committed);
    assert!(store.get_rule_set().await.get(&id).is_none());
}

#[tokio::test]
async fn test_commit_keeps_edits_made_during_window() {
    let store = MemoryStore::with_contents(sample_rules(), Settings::default());
    let mut view = store.get_rule_set().await;
    let doomed = view.rules[1].id.clone();
    let pending = begin_delete(&mut view, &doomed, SHORT_WINDOW).unwrap();

    let mut edited = store.get_rule_set().await;
    edited.rules.push(RedactionRule::new(RuleKind::Literal, "Alice", "Name"));
    store.save_rule_set(&edited).await.unwrap();

    let (_undo_tx, undo_rx) = oneshot::channel();
    commit_after_window(&store, &pending, undo_rx).await.unwrap();

    let stored = store.get_rule_set().await;
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().any(|r| r.find == "Alice"));
    assert!(stored.get(&doomed).is_none());
}

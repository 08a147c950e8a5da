// redactx/src/commands/rules.rs
//! The `rules` command family: list, edit, reorder, import, export and reset.
//!
//! Every editing subcommand follows the same shape: load the stored set,
//! apply one manager operation, save the whole set back.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};
use is_terminal::IsTerminal;
use log::debug;
use owo_colors::OwoColorize;
use tokio::sync::oneshot;

use redactx_core::{
    add_rule, apply_import, begin_delete, commit_after_window, delete_rule, export_tsv,
    group_by_dividers, move_down, move_up, parse_rules_file, reorder, reset_to_master,
    toggle_rule, undo_delete, update_rule, DeletionOutcome, ImportMode, NewRule, Placement, RedactxError,
    RuleGroup, RuleSet, RuleStore,
};

use crate::cli::RulesCommand;
use crate::commands::CommandContext;
use crate::ui::theme::{color_for, ThemeEntry};

pub async fn run_rules(ctx: &CommandContext, cmd: RulesCommand) -> Result<()> {
    match cmd {
        RulesCommand::List => list(ctx).await,
        RulesCommand::Add { kind, find, replace, note } => {
            let candidate = NewRule { kind: kind.into(), find, replace, note };
            let mut set = ctx.store.get_rule_set().await;
            let id = add_rule(&mut set, candidate)?.id.clone();
            save(ctx, &set).await?;
            ctx.success(format!("Added rule {}", id));
            Ok(())
        }
        RulesCommand::Divider { title } => {
            let mut set = ctx.store.get_rule_set().await;
            let added = add_rule(&mut set, NewRule::divider(title.unwrap_or_default()))?;
            let msg = format!("Added divider '{}' ({})", added.title(), added.id);
            save(ctx, &set).await?;
            ctx.success(msg);
            Ok(())
        }
        RulesCommand::Toggle { id } => {
            let mut set = ctx.store.get_rule_set().await;
            if !toggle_rule(&mut set, &id) {
                return Err(RedactxError::RuleNotFound(id).into());
            }
            let state = if set.get(&id).is_some_and(|r| r.enabled) { "enabled" } else { "disabled" };
            save(ctx, &set).await?;
            ctx.success(format!("Rule {} is now {}", id, state));
            Ok(())
        }
        RulesCommand::Update { id, find, replace } => {
            let mut set = ctx.store.get_rule_set().await;
            if !update_rule(&mut set, &id, &find, &replace) {
                return Err(RedactxError::RuleNotFound(id).into());
            }
            save(ctx, &set).await?;
            ctx.success(format!("Updated rule {}", id));
            Ok(())
        }
        RulesCommand::Delete { id, yes, undo_window } => delete(ctx, &id, yes, undo_window).await,
        RulesCommand::Move { id, before, after } => {
            let (target, placement) = match (before, after) {
                (Some(t), _) => (t, Placement::Before),
                (None, Some(t)) => (t, Placement::After),
                (None, None) => bail!("Pass --before or --after"),
            };
            let mut set = ctx.store.get_rule_set().await;
            if !reorder(&mut set, &id, &target, placement) {
                bail!("Cannot move rule {} relative to {}", id, target);
            }
            save(ctx, &set).await?;
            ctx.success(format!("Moved rule {}", id));
            Ok(())
        }
        RulesCommand::Up { id } => shift(ctx, &id, true).await,
        RulesCommand::Down { id } => shift(ctx, &id, false).await,
        RulesCommand::Import { file, mode } => import(ctx, &file, mode.into()).await,
        RulesCommand::Export { output } => {
            let set = ctx.store.get_rule_set().await;
            let text = export_tsv(&set);
            match output {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
                    ctx.success(format!("Exported {} rule(s) to {}", set.len(), path.display()));
                }
                None => io::stdout().write_all(text.as_bytes())?,
            }
            Ok(())
        }
        RulesCommand::Reset => {
            let master = reset_to_master(&ctx.store).await?;
            ctx.success(format!("Reset to the master list ({} rules)", master.len()));
            Ok(())
        }
    }
}

async fn save(ctx: &CommandContext, set: &RuleSet) -> Result<()> {
    ctx.store
        .save_rule_set(set)
        .await
        .with_context(|| format!("Failed to save rules to {}", ctx.store.dir().display()))
}

async fn shift(ctx: &CommandContext, id: &str, up: bool) -> Result<()> {
    let mut set = ctx.store.get_rule_set().await;
    if set.get(id).is_none() {
        return Err(RedactxError::RuleNotFound(id.to_string()).into());
    }
    let moved = if up { move_up(&mut set, id) } else { move_down(&mut set, id) };
    if moved {
        save(ctx, &set).await?;
        ctx.success(format!("Moved rule {} {}", id, if up { "up" } else { "down" }));
    } else {
        ctx.info(format!("Rule {} is already {}", id, if up { "first" } else { "last" }));
    }
    Ok(())
}

async fn delete(ctx: &CommandContext, id: &str, yes: bool, undo_window: u64) -> Result<()> {
    let mut set = ctx.store.get_rule_set().await;

    if yes || undo_window == 0 {
        if delete_rule(&mut set, id).is_none() {
            return Err(RedactxError::RuleNotFound(id.to_string()).into());
        }
        save(ctx, &set).await?;
        ctx.success(format!("Deleted rule {}", id));
        return Ok(());
    }

    let Some(pending) = begin_delete(&mut set, id, Duration::from_secs(undo_window)) else {
        return Err(RedactxError::RuleNotFound(id.to_string()).into());
    };
    ctx.warn(format!(
        "Deleting rule {} in {}s. Press Enter to undo.",
        id, undo_window
    ));

    let (undo_tx, undo_rx) = oneshot::channel();
    // Not spawn_blocking: runtime shutdown would wait on the pending stdin read.
    std::thread::spawn(move || {
        let mut line = String::new();
        if matches!(io::stdin().read_line(&mut line), Ok(n) if n > 0) {
            let _ = undo_tx.send(());
        }
    });

    match commit_after_window(&ctx.store, &pending, undo_rx).await? {
        DeletionOutcome::Committed => ctx.success(format!("Deleted rule {}", id)),
        DeletionOutcome::Undone => {
            undo_delete(&mut set, pending);
            debug!("In-memory view restored to {} rule(s).", set.len());
            ctx.info(format!("Restored rule {}", id));
        }
    }
    Ok(())
}

async fn import(ctx: &CommandContext, file: &Path, mode: ImportMode) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read rule file: {}", file.display()))?;
    let imported = parse_rules_file(&text)
        .with_context(|| format!("Import of {} failed; no rules were changed", file.display()))?;

    let mut set = ctx.store.get_rule_set().await;
    let summary = apply_import(&mut set, imported, mode);
    save(ctx, &set).await?;
    ctx.success(format!(
        "Imported: {} added, {} updated, {} divider(s). {} rule(s) total.",
        summary.added, summary.updated, summary.dividers, summary.total
    ));
    Ok(())
}

async fn list(ctx: &CommandContext) -> Result<()> {
    let set = ctx.store.get_rule_set().await;
    if !ctx.store.has_stored_rules().await {
        // pin the master list's ids so the listed ids can be used in edits
        save(ctx, &set).await?;
    }
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut out = stdout.lock();

    if set.is_empty() {
        writeln!(out, "No rules in profile.")?;
        return Ok(());
    }

    for group in group_by_dividers(&set) {
        let heading = format!("{} ({})", group.title(), group.count());
        if supports_color {
            writeln!(out, "{}", heading.color(color_for(&ctx.theme, ThemeEntry::Divider)))?;
        } else {
            writeln!(out, "{}", heading)?;
        }
        if group.count() > 0 {
            writeln!(out, "{}", group_table(&group))?;
        }
    }
    Ok(())
}

fn group_table(group: &RuleGroup<'_>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Type", "Find", "Replace", "Active", "Note"]);
    for rule in &group.rules {
        table.add_row(vec![
            Cell::new(&rule.id),
            Cell::new(rule.kind),
            Cell::new(&rule.find),
            Cell::new(&rule.replace),
            Cell::new(if rule.enabled { "Y" } else { "N" }),
            Cell::new(rule.note.as_deref().unwrap_or("")),
        ]);
    }
    table
}

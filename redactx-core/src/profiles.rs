// File: redactx-core/src/profiles.rs

//! profiles.rs - Per-profile persistence of rule sets and settings.
//!
//! A profile is a named pair of (rule set, settings). This module defines the
//! [`RuleStore`] collaborator the rest of the system talks to, a file-backed
//! implementation that keeps one directory per profile, and an in-memory one
//! for tests and embedding.
//!
//! Reads never fail: absent data yields the defaults (the bundled master list
//! and `Settings::default()`), and unreadable data is logged and treated the
//! same way. Writes are atomic (temp file + rename) and do report errors.
//!
//! license: MIT OR Apache-2.0

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{oneshot, RwLock};
use tokio::time::{sleep_until, Instant as TokioInstant};

use crate::config::{RuleSet, Settings};
use crate::errors::RedactxError;
use crate::manager::PendingDeletion;
use crate::master::load_master_rules;

/// Environment variable that overrides the store root directory.
pub const STORE_DIR_ENV: &str = "REDACTX_HOME";
/// Name of the profile used when none is given.
pub const DEFAULT_PROFILE: &str = "default";

const RULES_FILE: &str = "rules.json";
const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = ".tmp";

/// Key-value access to one profile's rules and settings.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// The stored rule set, or the master list if none is stored.
    async fn get_rule_set(&self) -> RuleSet;

    /// Persists the full ordered rule list in one write.
    async fn save_rule_set(&self, rules: &RuleSet) -> Result<(), RedactxError>;

    /// The stored settings, or defaults if none are stored.
    async fn get_settings(&self) -> Settings;

    async fn save_settings(&self, settings: &Settings) -> Result<(), RedactxError>;
}

/// Resolves the directory that holds all profiles.
///
/// Order: explicit path, then `REDACTX_HOME`, then the platform data directory.
pub fn resolve_store_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redactx")
        .join("profiles")
}

/// Stores each profile as `<root>/<profile>/rules.json` and `settings.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, profile: &str) -> Self {
        let profile = if profile.trim().is_empty() { DEFAULT_PROFILE } else { profile };
        Self { dir: root.into().join(profile) }
    }

    /// Opens `profile` under the root chosen by [`resolve_store_root`].
    pub fn open(explicit_root: Option<&Path>, profile: &str) -> Self {
        Self::new(resolve_store_root(explicit_root), profile)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a rule set has been written for this profile. Until then,
    /// reads return a freshly parsed master list with new ids each time.
    pub async fn has_stored_rules(&self) -> bool {
        tokio::fs::try_exists(self.dir.join(RULES_FILE)).await.unwrap_or(false)
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} not found; using defaults.", path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                None
            }
        }
    }

    async fn write_json<T: Serialize + Sync>(&self, name: &str, value: &T) -> Result<(), RedactxError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        let tmp_path = self.dir.join(format!("{}{}", name, TMP_SUFFIX));
        let json = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        debug!("Wrote {} ({} bytes).", path.display(), json.len());
        Ok(())
    }
}

#[async_trait]
impl RuleStore for FileStore {
    async fn get_rule_set(&self) -> RuleSet {
        match self.read_json(RULES_FILE).await {
            Some(rules) => rules,
            None => load_master_rules(),
        }
    }

    async fn save_rule_set(&self, rules: &RuleSet) -> Result<(), RedactxError> {
        self.write_json(RULES_FILE, rules).await?;
        info!("Saved {} rule(s) to {}.", rules.len(), self.dir.display());
        Ok(())
    }

    async fn get_settings(&self) -> Settings {
        self.read_json(SETTINGS_FILE).await.unwrap_or_default()
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), RedactxError> {
        self.write_json(SETTINGS_FILE, settings).await
    }
}

/// In-memory store. `None` slots behave like absent storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: RwLock<Option<RuleSet>>,
    settings: RwLock<Option<Settings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(rules: RuleSet, settings: Settings) -> Self {
        Self {
            rules: RwLock::new(Some(rules)),
            settings: RwLock::new(Some(settings)),
        }
    }
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn get_rule_set(&self) -> RuleSet {
        match self.rules.read().await.as_ref() {
            Some(rules) => rules.clone(),
            None => load_master_rules(),
        }
    }

    async fn save_rule_set(&self, rules: &RuleSet) -> Result<(), RedactxError> {
        *self.rules.write().await = Some(rules.clone());
        Ok(())
    }

    async fn get_settings(&self) -> Settings {
        self.settings.read().await.clone().unwrap_or_default()
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), RedactxError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}

/// Reads rules and settings concurrently.
pub async fn load_redaction_inputs(store: &dyn RuleStore) -> (RuleSet, Settings) {
    tokio::join!(store.get_rule_set(), store.get_settings())
}

/// Overwrites the profile's rules with the master list and returns it.
pub async fn reset_to_master(store: &dyn RuleStore) -> Result<RuleSet, RedactxError> {
    let master = load_master_rules();
    store.save_rule_set(&master).await?;
    info!("Reset profile to the master list ({} rules).", master.len());
    Ok(master)
}

/// How a soft delete ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The window elapsed and the rule was removed from storage.
    Committed,
    /// An undo arrived in time; storage was not touched.
    Undone,
}

/// Waits out a soft delete's undo window, then persists the removal.
///
/// Sending on the paired sender of `undo` before the deadline cancels the
/// commit; dropping the sender does not. The rule is removed from the
/// *currently stored* set by id, so edits made to other rules during the
/// window are kept.
pub async fn commit_after_window(
    store: &dyn RuleStore,
    pending: &PendingDeletion,
    undo: oneshot::Receiver<()>,
) -> Result<DeletionOutcome, RedactxError> {
    let sleep = sleep_until(TokioInstant::from_std(pending.deadline));
    tokio::pin!(sleep);
    tokio::select! {
        _ = &mut sleep => {}
        res = undo => match res {
            Ok(()) => {
                debug!("Deletion of '{}' undone.", pending.rule.id);
                return Ok(DeletionOutcome::Undone);
            }
            Err(_) => sleep.await,
        }
    }

    let mut stored = store.get_rule_set().await;
    if let Some(idx) = stored.position(&pending.rule.id) {
        stored.rules.remove(idx);
        store.save_rule_set(&stored).await?;
        info!("Committed deletion of rule '{}'.", pending.rule.id);
    } else {
        debug!("Rule '{}' was already gone from storage.", pending.rule.id);
    }
    Ok(DeletionOutcome::Committed)
}

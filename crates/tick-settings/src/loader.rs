//! Settings loading with deep merge and environment variable overrides.
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::types::TickSettings;

/// `~/.tick`, falling back to `/tmp/.tick` without a `HOME`.
pub fn tick_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".tick")
}

/// Resolve the path to the settings file (`~/.tick/settings.json`).
pub fn settings_path() -> PathBuf {
    tick_dir().join("settings.json")
}

/// Settings plus what happened while loading them.
///
/// Loading runs before the log subscriber exists, so the notable events are
/// kept here and emitted through [`LoadedSettings::log_events`] afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedSettings {
    pub settings: TickSettings,
    /// The settings file merged over the defaults, if one existed.
    pub file: Option<PathBuf>,
    pub ignored: Vec<IgnoredOverride>,
}

/// An environment override whose value could not be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredOverride {
    pub key: &'static str,
    pub value: String,
}

impl LoadedSettings {
    pub fn log_events(&self) {
        match &self.file {
            Some(path) => debug!(?path, "loaded settings file"),
            None => debug!("no settings file, using defaults"),
        }
        for ignored in &self.ignored {
            warn!(key = ignored.key, value = %ignored.value, "invalid env override, ignoring");
        }
    }
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<LoadedSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<LoadedSettings> {
    let (mut settings, file) = read_settings_file(path)?;
    let ignored = apply_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(LoadedSettings {
        settings,
        file,
        ignored,
    })
}

fn read_settings_file(path: &Path) -> Result<(TickSettings, Option<PathBuf>)> {
    let defaults = serde_json::to_value(TickSettings::default())?;

    if !path.exists() {
        return Ok((serde_json::from_value(defaults)?, None));
    }

    let content = std::fs::read_to_string(path)?;
    let user: Value = serde_json::from_str(&content)?;
    let settings = serde_json::from_value(deep_merge(defaults, user))?;
    Ok((settings, Some(path.to_owned())))
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `TICK_*` overrides read through `lookup`.
///
/// Empty values are skipped. Unparsable booleans are returned as ignored.
pub fn apply_overrides<F>(settings: &mut TickSettings, lookup: F) -> Vec<IgnoredOverride>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut ignored = Vec::new();

    if let Some(v) = read("TICK_DB") {
        settings.database.path = PathBuf::from(v);
    }
    if let Some(v) = read("TICK_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("TICK_LOG_JSON") {
        match parse_bool(&v) {
            Some(b) => settings.logging.json = b,
            None => ignored.push(IgnoredOverride {
                key: "TICK_LOG_JSON",
                value: v,
            }),
        }
    }
    if let Some(v) = read("TICK_ISSUES_URL") {
        settings.issues.endpoint = v;
    }
    ignored
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Settings type definitions.
//!
//! Field names are camelCase in JSON. Every section has `#[serde(default)]`
//! so a partial file only overrides what it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TickSettings {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    pub issues: IssueSettings,
    pub display: DisplaySettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Path of the SQLite file holding tasks, categories and the token.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: crate::loader::tick_dir().join("tick.db"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Level name (`error`..`trace`). `RUST_LOG` still wins at runtime.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueSettings {
    /// Endpoint listing the issues assigned to the token's user.
    pub endpoint: String,
    /// Category imported issues are filed under.
    pub category: String,
}

impl Default for IssueSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.github.com/issues".to_string(),
            category: "Github".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// Column used when `--order` is not given.
    pub default_sort: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_sort: "id".to_string(),
        }
    }
}

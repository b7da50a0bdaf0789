//! # tick-settings
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`TickSettings::default()`]
//! 2. **User file**: `~/.tick/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `TICK_*` overrides (highest priority)

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    deep_merge, load_settings, load_settings_from_path, settings_path, tick_dir, IgnoredOverride,
    LoadedSettings,
};
pub use types::*;

//! Talker settings and the settings file.
//!
//! Settings live in `~/.config/gcd-talker/settings.toml`. The database path is
//! resolved through a priority chain so the CLI, the environment and the file
//! all agree on which dump is used.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the GCD dump.
pub const DB_ENV_VAR: &str = "GCD_TALKER_DB";

/// Options that shape lookups and metadata mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TalkerSettings {
    /// Path to the GCD SQLite dump.
    pub db_file: Option<PathBuf>,
    /// Use the series start year as the volume number.
    pub use_series_start_as_volume: bool,
    /// Report the issue count of series that are still running.
    pub use_ongoing_issue_count: bool,
    /// Treat an unnumbered (`[nn]`) issue as issue 1 when searching.
    pub nn_is_issue_one: bool,
    /// Report `[nn]` issue numbers as `1`.
    pub replace_nn_with_one: bool,
    /// Use story titles as the title even when the issue has its own.
    pub prefer_story_titles: bool,
    /// Prepend series and issue notes to the description.
    pub combine_notes: bool,
    /// Fetch covers for single series/issue lookups.
    pub download_gui_covers: bool,
    /// Fetch covers for every issue matched during auto-tagging.
    pub download_tag_covers: bool,
    /// Preferred currency code for prices.
    pub currency: String,
}

impl Default for TalkerSettings {
    fn default() -> Self {
        Self {
            db_file: None,
            use_series_start_as_volume: false,
            use_ongoing_issue_count: false,
            nn_is_issue_one: false,
            replace_nn_with_one: false,
            prefer_story_titles: false,
            combine_notes: false,
            download_gui_covers: false,
            download_tag_covers: false,
            currency: "USD".to_string(),
        }
    }
}

/// Every key accepted by the settings file, in display order.
pub const SETTING_KEYS: &[&str] = &[
    "db_file",
    "use_series_start_as_volume",
    "use_ongoing_issue_count",
    "nn_is_issue_one",
    "replace_nn_with_one",
    "prefer_story_titles",
    "combine_notes",
    "download_gui_covers",
    "download_tag_covers",
    "currency",
];

/// Canonical path to the settings file: `~/.config/gcd-talker/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gcd-talker").join("settings.toml")
}

impl TalkerSettings {
    /// Load settings from the canonical file. A missing file yields defaults.
    pub fn load() -> io::Result<Self> {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Resolve the database path:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `GCD_TALKER_DB` environment variable
    /// 3. `db_file` from the settings
    pub fn resolve_db_file(&mut self, cli_override: Option<PathBuf>) {
        if let Some(p) = cli_override {
            self.db_file = Some(p);
            return;
        }
        if let Some(p) = std::env::var_os(DB_ENV_VAR).filter(|v| !v.is_empty()) {
            self.db_file = Some(PathBuf::from(p));
        }
    }

    /// Render the settings as TOML for display.
    pub fn to_toml(&self) -> io::Result<String> {
        toml::to_string_pretty(self).map_err(io::Error::other)
    }
}

/// Set one key in the settings file at `path`.
///
/// Uses `toml::Value` for a surgical update so unknown keys and formatting of
/// other entries survive. Boolean keys accept `true`/`false`; an empty value
/// for `db_file` removes it.
pub fn set_setting(path: &Path, key: &str, value: &str) -> io::Result<()> {
    if !SETTING_KEYS.contains(&key) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unknown setting '{key}'"),
        ));
    }

    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default())),
        Err(_) => toml::Value::Table(Default::default()),
    };
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;

    match key {
        "db_file" if value.trim().is_empty() => {
            table.remove(key);
        }
        "db_file" | "currency" => {
            table.insert(key.to_string(), toml::Value::String(value.trim().to_string()));
        }
        _ => {
            let flag = value.trim().parse::<bool>().map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Setting '{key}' expects true or false, got '{value}'"),
                )
            })?;
            table.insert(key.to_string(), toml::Value::Boolean(flag));
        }
    }

    write_atomic(path, &toml::to_string_pretty(&doc).map_err(io::Error::other)?)
}

/// Save the full settings to `path`.
pub fn save_settings(path: &Path, settings: &TalkerSettings) -> io::Result<()> {
    write_atomic(path, &settings.to_toml()?)
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

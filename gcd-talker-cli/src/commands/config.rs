use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gcd_talker_lib::settings::{DB_ENV_VAR, SETTING_KEYS, set_setting};
use gcd_talker_lib::{TalkerSettings, settings_path};

use crate::CliError;

/// Where the effective database path came from.
enum DbSource {
    Flag,
    EnvVar,
    SettingsFile,
    Unset,
}

impl std::fmt::Display for DbSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbSource::Flag => write!(f, "--db flag"),
            DbSource::EnvVar => write!(f, "{DB_ENV_VAR}"),
            DbSource::SettingsFile => write!(f, "settings file"),
            DbSource::Unset => write!(f, "not set"),
        }
    }
}

/// Show the effective settings and their sources.
pub(crate) fn run_config_show(cli_db: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings_path();
    let file_settings = TalkerSettings::load_from(&path)
        .map_err(|e| CliError::config(format!("Failed to load {}: {e}", path.display())))?;

    let source = if cli_db.is_some() {
        DbSource::Flag
    } else if std::env::var_os(DB_ENV_VAR).is_some_and(|v| !v.is_empty()) {
        DbSource::EnvVar
    } else if file_settings.db_file.is_some() {
        DbSource::SettingsFile
    } else {
        DbSource::Unset
    };
    let mut settings = file_settings;
    settings.resolve_db_file(cli_db);

    log::info!(
        "{}",
        "GCD Talker Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        },
    );
    crate::log_blank();

    let values = serde_json::to_value(&settings)?;
    for key in SETTING_KEYS {
        let value = match values.get(*key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        };
        if *key == "db_file" {
            log::info!(
                "  {:<28} {} {}",
                key,
                value.if_supports_color(Stdout, |t| t.bold()),
                format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!("  {:<28} {}", key, value);
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Set one key in the settings file.
pub(crate) fn run_config_set(key: &str, value: &str) -> Result<(), CliError> {
    let path = settings_path();
    set_setting(&path, key, value).map_err(|e| CliError::config(e.to_string()))?;
    log::info!(
        "{} {} = {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key,
        value,
    );
    log::info!("  Saved to {}", path.display());
    Ok(())
}

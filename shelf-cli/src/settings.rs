//! Persistent CLI settings (database location, default user).
//!
//! The settings file is `~/.config/shelf/settings.toml`:
//!
//! ```toml
//! [library]
//! database = "/home/me/games/catalog.db"
//! user = "me"
//! ```

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// User name used when neither `--user` nor the settings file names one.
pub(crate) const DEFAULT_USER: &str = "default";

/// Canonical path to the settings file: `~/.config/shelf/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("shelf").join("settings.toml")
}

/// Default database location: `<data dir>/shelf/catalog.db`.
pub(crate) fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("shelf").join("catalog.db")
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub library: LibrarySettings,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LibrarySettings {
    pub database: Option<PathBuf>,
    pub user: Option<String>,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Flag,
    SettingsFile,
    Default,
}

impl Source {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Source::Flag => "command line",
            Source::SettingsFile => "settings file",
            Source::Default => "default",
        }
    }
}

/// Load settings, falling back to defaults when the file is missing or invalid.
pub(crate) fn load_settings() -> Settings {
    let path = settings_path();
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_settings(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

pub(crate) fn parse_settings(contents: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}

/// Resolve the database path: CLI flag, then settings file, then default.
pub(crate) fn resolve_db_path(cli_override: Option<PathBuf>, settings: &Settings) -> (PathBuf, Source) {
    if let Some(p) = cli_override {
        return (p, Source::Flag);
    }
    match &settings.library.database {
        Some(p) if !p.as_os_str().is_empty() => (p.clone(), Source::SettingsFile),
        _ => (default_db_path(), Source::Default),
    }
}

/// Resolve the acting user: CLI flag, then settings file, then [`DEFAULT_USER`].
pub(crate) fn resolve_user(cli_override: Option<String>, settings: &Settings) -> (String, Source) {
    if let Some(u) = cli_override {
        return (u, Source::Flag);
    }
    match &settings.library.user {
        Some(u) if !u.is_empty() => (u.clone(), Source::SettingsFile),
        _ => (DEFAULT_USER.to_string(), Source::Default),
    }
}

/// Set `library.<key>` in `settings.toml`, keeping any other content.
pub(crate) fn save_library_value(key: &str, value: &str) -> io::Result<()> {
    let settings = settings_path();
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(&settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    set_library_value(&mut doc, key, value)?;
    write_atomically(&settings, &toml::to_string_pretty(&doc).map_err(io::Error::other)?)
}

pub(crate) fn set_library_value(doc: &mut toml::Value, key: &str, value: &str) -> io::Result<()> {
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let library = table
        .entry("library")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let lib_table = library
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[library] is not a table"))?;
    lib_table.insert(key.to_string(), toml::Value::String(value.to_string()));
    Ok(())
}

fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub(crate) fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

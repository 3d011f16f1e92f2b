use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::settings;
use crate::CliError;

/// Show the resolved database path and user, and where each came from.
pub(crate) fn run_config_show(db: Option<PathBuf>, user: Option<String>) -> Result<(), CliError> {
    let path = settings::settings_path();
    let loaded = settings::load_settings();

    log::info!(
        "{}",
        "shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let (db_path, db_source) = settings::resolve_db_path(db, &loaded);
    let (username, user_source) = settings::resolve_user(user, &loaded);
    log::info!(
        "  {:<10} {} {}",
        "database",
        db_path.display(),
        format!("({})", db_source.label()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<10} {} {}",
        "user",
        username,
        format!("({})", user_source.label()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

/// Print the settings file path, for use in scripts.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings::settings_path().display());
    Ok(())
}

pub(crate) fn run_config_set_db(path: &Path) -> Result<(), CliError> {
    let absolute = std::path::absolute(path)?;
    save_value("database", &absolute.to_string_lossy())
}

pub(crate) fn run_config_set_user(name: &str) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::config("user name must not be empty"));
    }
    save_value("user", name)
}

fn save_value(key: &str, value: &str) -> Result<(), CliError> {
    settings::save_library_value(key, value).map_err(|e| {
        CliError::config(format!(
            "Failed to write {}: {}",
            settings::settings_path().display(),
            e
        ))
    })?;
    log::info!(
        "{} Set library.{} = {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        key,
        value.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

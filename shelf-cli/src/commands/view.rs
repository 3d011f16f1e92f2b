use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;
use shelf_archive::ViewResult;
use shelf_catalog::CatalogEntry;

use super::log_entry_table;
use crate::CliError;

#[derive(Serialize)]
struct ViewJson<'a> {
    file: String,
    verified: bool,
    problem: Option<String>,
    entries: &'a [CatalogEntry],
}

/// Show an archive's contents without importing it.
///
/// Verification problems are reported as warnings; whatever records could
/// be read are still shown. With `json`, stdout carries only the JSON
/// document and the problem is also reported in its `problem` field.
pub(crate) fn run_view(file: &Path, json: bool) -> Result<(), CliError> {
    let view = shelf_archive::read_for_view(file);

    if json {
        println!("{}", render_json(file, &view)?);
        return Ok(());
    }

    let status = if view.outcome.is_ok() {
        "verified".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        view.outcome
            .kind()
            .if_supports_color(Stdout, |t| t.red())
            .to_string()
    };
    log::info!(
        "{} ({}, {} games)",
        file.display().if_supports_color(Stdout, |t| t.bold()),
        status,
        view.entries.len(),
    );

    if view.entries.is_empty() {
        return Ok(());
    }
    crate::log_blank();
    log_entry_table(&view.entries);
    Ok(())
}

fn render_json(file: &Path, view: &ViewResult) -> Result<String, CliError> {
    let out = ViewJson {
        file: file.display().to_string(),
        verified: view.outcome.is_ok(),
        problem: (!view.outcome.is_ok()).then(|| view.outcome.to_string()),
        entries: &view.entries,
    };
    serde_json::to_string_pretty(&out)
        .map_err(|e| CliError::other(format!("Failed to serialize view: {}", e)))
}

#[cfg(test)]
#[path = "../tests/view_tests.rs"]
mod tests;

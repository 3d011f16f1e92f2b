use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use shelf_archive::SqliteCatalog;

use super::Session;
use crate::progress::BarProgress;
use crate::CliError;

/// Import a verified archive into the acting user's collection.
///
/// Records the database refuses (usually duplicate names) are listed and
/// make the command fail after the rest have been imported.
pub(crate) fn run_import(session: &Session, file: &Path) -> Result<(), CliError> {
    let (conn, owner_id) = session.open()?;
    let mut catalog = SqliteCatalog::new(&conn, owner_id);
    let progress = BarProgress::new(session.quiet);

    let report = shelf_archive::import(file, owner_id, &mut catalog, Some(&progress))?;

    log::info!(
        "{} Imported {} of {} games from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        report.imported,
        report.total,
        file.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    if let Some(reason) = &report.history_error {
        log::warn!("Games were imported but the import history was not updated: {}", reason);
    }

    if report.is_complete() {
        return Ok(());
    }

    crate::log_blank();
    log::info!(
        "{}",
        "Not imported:".if_supports_color(Stdout, |t| t.yellow())
    );
    for failed in &report.failed {
        log::info!(
            "  #{:<5} {}  {}",
            failed.index,
            failed.name,
            failed.reason.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    Err(CliError::ImportIncomplete {
        failed: report.failed.len(),
        total: report.total,
    })
}

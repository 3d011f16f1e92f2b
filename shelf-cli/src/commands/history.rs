use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{truncate_str, Session};
use crate::CliError;

/// Show the most recent imports into this database, newest first.
pub(crate) fn run_history(session: &Session, limit: u32) -> Result<(), CliError> {
    let (conn, _) = session.open()?;
    let logs = shelf_db::list_import_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(e.to_string()))?;

    if logs.is_empty() {
        log::info!(
            "{}",
            "No imports recorded.".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    log::info!(
        "  {:<26} {:<32} {:>8} {:>8} {:>8}",
        "When",
        "File",
        "Total",
        "Imported",
        "Failed"
    );
    for entry in &logs {
        let failed = if entry.records_failed > 0 {
            entry
                .records_failed
                .if_supports_color(Stdout, |t| t.red())
                .to_string()
        } else {
            entry.records_failed.to_string()
        };
        log::info!(
            "  {:<26} {:<32} {:>8} {:>8} {:>8}",
            entry.imported_at,
            truncate_str(&entry.source_name, 32),
            entry.records_total,
            entry.records_imported,
            failed,
        );
    }
    Ok(())
}

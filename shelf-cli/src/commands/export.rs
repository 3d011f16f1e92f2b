use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use shelf_archive::{ExportOptions, SqliteCatalog, WriteMode};

use super::{build_filter, Session};
use crate::cli_types::FilterArgs;
use crate::progress::BarProgress;
use crate::CliError;

/// Export the acting user's collection, optionally filtered, to an archive file.
pub(crate) fn run_export(
    session: &Session,
    file: &Path,
    filter_args: &FilterArgs,
    in_place: bool,
) -> Result<(), CliError> {
    let (conn, owner_id) = session.open()?;
    let filter = build_filter(&conn, owner_id, filter_args)?;

    let mut catalog = SqliteCatalog::new(&conn, owner_id).with_filter(filter);

    let options = ExportOptions {
        mode: if in_place {
            WriteMode::InPlace
        } else {
            WriteMode::Atomic
        },
    };
    let progress = BarProgress::new(session.quiet);
    let summary = shelf_archive::export_from(&mut catalog, file, options, Some(&progress))?;

    log::info!(
        "{} Exported {} games to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.records,
        summary.path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  SHA-256: {}",
        summary.hash.if_supports_color(Stdout, |t| t.dimmed())
    );
    if summary.truncated_records > 0 {
        log::warn!(
            "{} record(s) had text fields shortened to fit the file format",
            summary.truncated_records
        );
    }
    Ok(())
}

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Check an archive's magic, version and checksum.
pub(crate) fn run_verify(file: &Path) -> Result<(), CliError> {
    let outcome = shelf_archive::verify(file);
    if !outcome.is_ok() {
        return Err(CliError::verification(outcome.to_string()));
    }

    log::info!(
        "{} {} verified",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        file.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

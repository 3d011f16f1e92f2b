use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Session;
use crate::CliError;

pub(crate) fn run_genres(session: &Session) -> Result<(), CliError> {
    let (conn, _) = session.open()?;
    let genres = shelf_db::list_genres(&conn).map_err(|e| CliError::database(e.to_string()))?;

    for genre in &genres {
        log::info!(
            "  {:<16} {}",
            genre.name.if_supports_color(Stdout, |t| t.bold()),
            genre.description.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

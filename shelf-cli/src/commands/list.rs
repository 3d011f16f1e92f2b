use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{build_filter, log_entry_table, Session};
use crate::cli_types::FilterArgs;
use crate::CliError;

pub(crate) fn run_list(session: &Session, filter_args: &FilterArgs) -> Result<(), CliError> {
    let (conn, owner_id) = session.open()?;
    let filter = build_filter(&conn, owner_id, filter_args)?;
    let games = shelf_db::filtered_games(&conn, owner_id, &filter)
        .map_err(|e| CliError::database(e.to_string()))?;

    if games.is_empty() {
        log::info!(
            "{}",
            "No games match.".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    log_entry_table(&games);
    crate::log_blank();
    log::info!("{} games", games.len());
    Ok(())
}

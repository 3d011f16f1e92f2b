use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{format_gb, truncate_str, Session};
use crate::CliError;

/// Print collection totals, per-genre aggregates and tag usage.
pub(crate) fn run_stats(session: &Session) -> Result<(), CliError> {
    let (conn, owner_id) = session.open()?;
    let db_err = |e: shelf_db::OperationError| CliError::database(e.to_string());

    let stats = shelf_db::game_stats(&conn, owner_id).map_err(db_err)?;
    let genres = shelf_db::genre_stats(&conn, owner_id).map_err(db_err)?;
    let tags = shelf_db::tag_usage(&conn, owner_id).map_err(db_err)?;

    log::info!(
        "{}",
        format!("Collection of '{}'", session.username).if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  {:<22} {:>8}", "Games", stats.total);
    log::info!("  {:<22} {:>8}", "Favorites", stats.favorites);
    log::info!("  {:<22} {:>8}", "Completed", stats.completed);
    log::info!("  {:<22} {:>8}", "Unrated", stats.unrated);
    log::info!("  {:<22} {:>8}", "Installed", stats.installed);
    log::info!(
        "  {:<22} {:>8}",
        "Installed size",
        format_gb(stats.installed_disk_space)
    );
    log::info!("  {:<22} {:>8}", "Without URL", stats.without_url);

    if !genres.is_empty() {
        crate::log_blank();
        log::info!("{}", "By genre".if_supports_color(Stdout, |t| t.bold()));
        log::info!(
            "  {:<16} {:>6} {:>9} {:>10} {:>10}",
            "Genre",
            "Games",
            "Completed",
            "Avg rating",
            "Disk"
        );
        for g in &genres {
            log::info!(
                "  {:<16} {:>6} {:>9} {:>10.1} {:>10}",
                truncate_str(&g.genre_name, 16),
                g.games,
                g.completed,
                g.avg_rating,
                format_gb(g.total_disk_space),
            );
        }
    }

    if !tags.is_empty() {
        crate::log_blank();
        log::info!("{}", "Tags".if_supports_color(Stdout, |t| t.bold()));
        for tag in &tags {
            log::info!("  {:<22} {:>8}", truncate_str(&tag.name, 22), tag.count);
        }
    }
    Ok(())
}

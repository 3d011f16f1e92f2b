pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod export;
pub(crate) mod genres;
pub(crate) mod history;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod stats;
pub(crate) mod verify;
pub(crate) mod view;

use std::path::PathBuf;

use rusqlite::Connection;
use shelf_catalog::types::{CatalogEntry, GameFilter};

use crate::cli_types::FilterArgs;
use crate::CliError;

/// Resolved database location and acting user for one invocation.
pub(crate) struct Session {
    pub db_path: PathBuf,
    pub username: String,
    pub quiet: bool,
}

impl Session {
    /// Open (or create) the database and return it with the acting user's id.
    ///
    /// Genres are seeded on first use and the user is created if missing.
    pub(crate) fn open(&self) -> Result<(Connection, i32), CliError> {
        let conn = shelf_db::open_database(&self.db_path).map_err(|e| {
            CliError::database(format!(
                "Failed to open collection database at {}: {}",
                self.db_path.display(),
                e
            ))
        })?;

        let seeded = shelf_db::seed_default_genres(&conn)
            .map_err(|e| CliError::database(format!("Failed to seed genres: {}", e)))?;
        if seeded > 0 {
            log::debug!("Seeded {} default genres", seeded);
        }

        let owner_id = shelf_db::ensure_user(&conn, &self.username)
            .map_err(|e| CliError::database(format!("Failed to resolve user '{}': {}", self.username, e)))?;
        log::debug!("Acting as '{}' (id {}) on {}", self.username, owner_id, self.db_path.display());

        Ok((conn, owner_id))
    }
}

/// Translate filter flags into a [`GameFilter`], resolving genre and tag names.
pub(crate) fn build_filter(
    conn: &Connection,
    owner_id: i32,
    args: &FilterArgs,
) -> Result<GameFilter, CliError> {
    let genre_id = match &args.genre {
        Some(name) => Some(
            shelf_db::find_genre_by_name(conn, name)
                .map_err(|e| CliError::database(e.to_string()))?
                .ok_or_else(|| CliError::unknown_genre(name))?
                .id,
        ),
        None => None,
    };
    let tag_id = match &args.tag {
        Some(name) => Some(
            shelf_db::find_tag_by_name(conn, name, owner_id)
                .map_err(|e| CliError::database(e.to_string()))?
                .ok_or_else(|| CliError::unknown_tag(name))?
                .id,
        ),
        None => None,
    };

    Ok(GameFilter {
        completed: flag_pair(args.completed, args.not_completed),
        genre_id,
        disk_space_min: args.min_disk,
        disk_space_max: args.max_disk,
        ram_min: args.min_ram,
        ram_max: args.max_ram,
        vram_min: args.min_vram,
        vram_max: args.max_vram,
        tag_id,
        favorite: args.favorite.then_some(true),
        installed: args.installed.then_some(true),
        rating_min: args.min_rating,
        rating_max: args.max_rating,
        has_rating: flag_pair(args.rated, args.unrated),
    })
}

/// `--x` → `Some(true)`, `--not-x` → `Some(false)`, neither → `None`.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Print entries as an aligned table through the logger.
pub(crate) fn log_entry_table(entries: &[CatalogEntry]) {
    log::info!(
        "  {:<32} {:<14} {:>6} {:>8} {:>6} {:>6}  {}",
        "Name",
        "Genre",
        "Rating",
        "Disk",
        "RAM",
        "VRAM",
        "Tags"
    );
    for entry in entries {
        log::info!(
            "  {:<32} {:<14} {:>6} {:>8} {:>6} {:>6}  {}{}",
            truncate_str(&entry.name, 32),
            truncate_str(entry.genre.as_deref().unwrap_or("-"), 14),
            format_rating(entry.rating),
            format_gb(entry.disk_space),
            format_gb(entry.ram_usage),
            format_gb(entry.vram_required),
            entry.tags,
            status_marks(entry),
        );
    }
}

fn status_marks(entry: &CatalogEntry) -> String {
    let mut marks = String::new();
    if entry.is_favorite {
        marks.push_str(" \u{2605}");
    }
    if entry.completed {
        marks.push_str(" \u{2713}");
    }
    if entry.is_installed {
        marks.push_str(" [installed]");
    }
    marks
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max).collect()
    }
}

pub(crate) fn format_gb(value: f64) -> String {
    format!("{:.1} GB", value)
}

pub(crate) fn format_rating(rating: Option<i32>) -> String {
    match rating {
        Some(r) => format!("{}/10", r),
        None => "-".to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;

//! Read queries for the collection database.
//!
//! Provides entry listing and filtering, genre/tag listings, statistics,
//! and import history.

use rusqlite::types::ToSql;
use rusqlite::{params, Connection};
use shelf_catalog::types::*;

use crate::operations::OperationError;

/// Columns selected for every catalog entry query, in `row_to_entry` order.
///
/// Tags are aggregated in name order so the denormalized string is stable.
const ENTRY_COLUMNS: &str = "g.id, g.name, g.disk_space, g.ram_usage, g.vram_required,
    g.genre_id, gen.name, g.completed, g.url, g.user_id, g.rating,
    g.is_favorite, g.is_installed, g.notes,
    COALESCE((SELECT group_concat(t.name, ', ' ORDER BY t.name)
              FROM tags t JOIN game_tags gt ON gt.tag_id = t.id
              WHERE gt.game_id = g.id), '')";

// ── Entry Queries ───────────────────────────────────────────────────────────

/// List all of the owner's entries, ordered by name.
pub fn list_games(conn: &Connection, owner_id: i32) -> Result<Vec<CatalogEntry>, OperationError> {
    filtered_games(conn, owner_id, &GameFilter::default())
}

/// List the owner's entries matching `filter`, ordered by name.
///
/// Every filter value is bound as a parameter.
pub fn filtered_games(
    conn: &Connection,
    owner_id: i32,
    filter: &GameFilter,
) -> Result<Vec<CatalogEntry>, OperationError> {
    let (condition, param_values) = build_filter_condition(owner_id, filter);
    let sql = format!(
        "SELECT {ENTRY_COLUMNS}
         FROM games g LEFT JOIN genres gen ON gen.id = g.genre_id
         WHERE {condition}
         ORDER BY g.name"
    );

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = param_values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), row_to_entry)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Translate a filter into a `WHERE` clause plus its positional parameters.
fn build_filter_condition(owner_id: i32, filter: &GameFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clauses = vec!["g.user_id = ?1".to_string()];
    let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(owner_id)];

    let mut push = |clause: &str, value: Box<dyn ToSql>| {
        values.push(value);
        clauses.push(clause.replace('?', &format!("?{}", values.len())));
    };

    if let Some(completed) = filter.completed {
        push("g.completed = ?", Box::new(completed));
    }
    if let Some(genre_id) = filter.genre_id {
        push("g.genre_id = ?", Box::new(genre_id));
    }
    if let Some(min) = filter.disk_space_min {
        push("g.disk_space >= ?", Box::new(min));
    }
    if let Some(max) = filter.disk_space_max {
        push("g.disk_space <= ?", Box::new(max));
    }
    if let Some(min) = filter.ram_min {
        push("g.ram_usage >= ?", Box::new(min));
    }
    if let Some(max) = filter.ram_max {
        push("g.ram_usage <= ?", Box::new(max));
    }
    if let Some(min) = filter.vram_min {
        push("g.vram_required >= ?", Box::new(min));
    }
    if let Some(max) = filter.vram_max {
        push("g.vram_required <= ?", Box::new(max));
    }
    if let Some(favorite) = filter.favorite {
        push("g.is_favorite = ?", Box::new(favorite));
    }
    if let Some(installed) = filter.installed {
        push("g.is_installed = ?", Box::new(installed));
    }
    // Rating bounds only ever match rated entries.
    if let Some(min) = filter.rating_min {
        push("(g.rating >= 0 AND g.rating >= ?)", Box::new(min));
    }
    if let Some(max) = filter.rating_max {
        push("(g.rating >= 0 AND g.rating <= ?)", Box::new(max));
    }
    if let Some(tag_id) = filter.tag_id {
        push(
            "EXISTS (SELECT 1 FROM game_tags gt WHERE gt.game_id = g.id AND gt.tag_id = ?)",
            Box::new(tag_id),
        );
    }
    match filter.has_rating {
        Some(true) => clauses.push("g.rating >= 0".to_string()),
        Some(false) => clauses.push(format!("g.rating = {UNRATED}")),
        None => {}
    }

    (clauses.join(" AND "), values)
}

/// Tag ids linked to a game.
pub fn game_tag_ids(conn: &Connection, game_id: i32) -> Result<Vec<i32>, OperationError> {
    let mut stmt = conn.prepare("SELECT tag_id FROM game_tags WHERE game_id = ?1 ORDER BY tag_id")?;
    let rows = stmt.query_map(params![game_id], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Genre & Tag Listings ────────────────────────────────────────────────────

/// List all genres by name.
pub fn list_genres(conn: &Connection) -> Result<Vec<Genre>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM genres ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Genre {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the owner's tags by name.
pub fn list_user_tags(conn: &Connection, owner_id: i32) -> Result<Vec<Tag>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, user_id, color FROM tags WHERE user_id = ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![owner_id], |row| {
        Ok(Tag {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: row.get(2)?,
            color: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary counts for the owner's collection.
pub fn game_stats(conn: &Connection, owner_id: i32) -> Result<GameStats, OperationError> {
    conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(is_favorite), 0),
                COALESCE(SUM(completed), 0),
                COALESCE(SUM(rating = -1), 0),
                COALESCE(SUM(is_installed), 0),
                COALESCE(SUM(CASE WHEN is_installed THEN disk_space END), 0.0),
                COALESCE(SUM(url = ''), 0)
         FROM games WHERE user_id = ?1",
        params![owner_id],
        |row| {
            Ok(GameStats {
                total: row.get(0)?,
                favorites: row.get(1)?,
                completed: row.get(2)?,
                unrated: row.get(3)?,
                installed: row.get(4)?,
                installed_disk_space: row.get(5)?,
                without_url: row.get(6)?,
            })
        },
    )
    .map_err(Into::into)
}

/// Per-genre aggregates for genres the owner has at least one entry in.
pub fn genre_stats(conn: &Connection, owner_id: i32) -> Result<Vec<GenreStats>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT gen.id, gen.name,
                COUNT(g.id) AS games_count,
                COALESCE(SUM(g.completed), 0),
                AVG(CASE WHEN g.rating >= 0 THEN g.rating END),
                COALESCE(SUM(g.disk_space), 0.0)
         FROM genres gen
         JOIN games g ON g.genre_id = gen.id AND g.user_id = ?1
         GROUP BY gen.id, gen.name
         HAVING COUNT(g.id) > 0
         ORDER BY games_count DESC, gen.name",
    )?;
    let rows = stmt.query_map(params![owner_id], |row| {
        Ok(GenreStats {
            genre_id: row.get(0)?,
            genre_name: row.get(1)?,
            games: row.get(2)?,
            completed: row.get(3)?,
            avg_rating: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
            total_disk_space: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// How often each of the owner's tags is used, most used first.
pub fn tag_usage(conn: &Connection, owner_id: i32) -> Result<Vec<TagUsage>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT t.name, COUNT(gt.game_id) AS usage_count
         FROM tags t LEFT JOIN game_tags gt ON gt.tag_id = t.id
         WHERE t.user_id = ?1
         GROUP BY t.id, t.name
         ORDER BY usage_count DESC, t.name",
    )?;
    let rows = stmt.query_map(params![owner_id], |row| {
        Ok(TagUsage {
            name: row.get(0)?,
            count: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_name, user_id, imported_at,
                records_total, records_imported, records_failed
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            owner_id: row.get(2)?,
            imported_at: row.get(3)?,
            records_total: row.get(4)?,
            records_imported: row.get(5)?,
            records_failed: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogEntry> {
    let rating: i32 = row.get(10)?;
    Ok(CatalogEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        disk_space: row.get(2)?,
        ram_usage: row.get(3)?,
        vram_required: row.get(4)?,
        genre_id: row.get(5)?,
        genre: row.get(6)?,
        completed: row.get(7)?,
        url: row.get(8)?,
        owner_id: row.get(9)?,
        rating: (rating != UNRATED).then_some(rating),
        is_favorite: row.get(11)?,
        is_installed: row.get(12)?,
        notes: row.get(13)?,
        tags: row.get(14)?,
    })
}

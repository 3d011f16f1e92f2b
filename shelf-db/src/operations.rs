//! CRUD operations for users, genres, tags, and catalog entries.

use rusqlite::{params, Connection, OptionalExtension};
use shelf_catalog::types::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Get the id of the named user, creating the user if needed.
pub fn ensure_user(conn: &Connection, username: &str) -> Result<i32, OperationError> {
    conn.execute(
        "INSERT INTO users (username) VALUES (?1) ON CONFLICT(username) DO NOTHING",
        params![username],
    )?;
    let id = conn.query_row(
        "SELECT id FROM users WHERE username = ?1",
        params![username],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Find a user by exact username.
pub fn find_user_by_name(conn: &Connection, username: &str) -> Result<Option<User>, OperationError> {
    conn.query_row(
        "SELECT id, username, created_at FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

// ── Genre Operations ────────────────────────────────────────────────────────

/// Seed [`DEFAULT_GENRES`] into an empty genre table.
///
/// Returns the number of genres inserted; zero when any genre already exists.
pub fn seed_default_genres(conn: &Connection) -> Result<usize, OperationError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM genres", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    for (name, description) in DEFAULT_GENRES {
        inserted += tx.execute(
            "INSERT INTO genres (name, description) VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            params![name, description],
        )?;
    }
    tx.commit()?;
    Ok(inserted)
}

/// Insert a genre. Returns the generated ID.
pub fn insert_genre(conn: &Connection, name: &str, description: &str) -> Result<i32, OperationError> {
    conn.execute(
        "INSERT INTO genres (name, description) VALUES (?1, ?2)",
        params![name, description],
    )?;
    Ok(conn.last_insert_rowid() as i32)
}

/// Find a genre by exact name.
pub fn find_genre_by_name(conn: &Connection, name: &str) -> Result<Option<Genre>, OperationError> {
    conn.query_row(
        "SELECT id, name, description FROM genres WHERE name = ?1",
        params![name],
        |row| {
            Ok(Genre {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

// ── Tag Operations ──────────────────────────────────────────────────────────

/// Find one of the owner's tags by exact name.
pub fn find_tag_by_name(
    conn: &Connection,
    name: &str,
    owner_id: i32,
) -> Result<Option<Tag>, OperationError> {
    conn.query_row(
        "SELECT id, name, user_id, color FROM tags WHERE name = ?1 AND user_id = ?2",
        params![name, owner_id],
        |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
                owner_id: row.get(2)?,
                color: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(Into::into)
}

/// Get the id of the owner's tag with this name, creating it if absent.
///
/// The insert is a no-op when another writer created the same tag first,
/// so the lookup that follows always sees exactly one row.
pub fn insert_or_get_tag(conn: &Connection, name: &str, owner_id: i32) -> Result<i32, OperationError> {
    let created = conn.execute(
        "INSERT INTO tags (name, user_id, color) VALUES (?1, ?2, ?3)
         ON CONFLICT(name, user_id) DO NOTHING",
        params![name, owner_id, DEFAULT_TAG_COLOR],
    )?;
    if created > 0 {
        log::debug!("Created tag '{}' for user {}", name, owner_id);
    }

    find_tag_by_name(conn, name, owner_id)?
        .map(|tag| tag.id)
        .ok_or_else(|| OperationError::NotFound {
            entity_type: "tag".to_string(),
            id: name.to_string(),
        })
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new catalog entry owned by `entry.owner_id`. Returns the generated ID.
///
/// Fails with a constraint error when the owner already has an entry of the
/// same name. Tag links are set separately via [`set_game_tags`].
pub fn insert_game(conn: &Connection, entry: &CatalogEntry) -> Result<i32, OperationError> {
    conn.execute(
        "INSERT INTO games (name, disk_space, ram_usage, vram_required, genre_id,
             completed, url, user_id, rating, is_favorite, is_installed, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            entry.name,
            entry.disk_space,
            entry.ram_usage,
            entry.vram_required,
            entry.genre_id,
            entry.completed,
            entry.url,
            entry.owner_id,
            entry.rating.unwrap_or(UNRATED),
            entry.is_favorite,
            entry.is_installed,
            entry.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid() as i32)
}

/// Replace the set of tags linked to a game.
pub fn set_game_tags(conn: &Connection, game_id: i32, tag_ids: &[i32]) -> Result<(), OperationError> {
    conn.execute("DELETE FROM game_tags WHERE game_id = ?1", params![game_id])?;
    for tag_id in tag_ids {
        conn.execute(
            "INSERT OR IGNORE INTO game_tags (game_id, tag_id) VALUES (?1, ?2)",
            params![game_id, tag_id],
        )?;
    }
    Ok(())
}

/// Delete one of the owner's entries.
pub fn delete_game(conn: &Connection, game_id: i32, owner_id: i32) -> Result<(), OperationError> {
    let changed = conn.execute(
        "DELETE FROM games WHERE id = ?1 AND user_id = ?2",
        params![game_id, owner_id],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "game".to_string(),
            id: game_id.to_string(),
        });
    }
    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, user_id, imported_at,
             records_total, records_imported, records_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source_name,
            log.owner_id,
            log.imported_at,
            log.records_total,
            log.records_imported,
            log.records_failed,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

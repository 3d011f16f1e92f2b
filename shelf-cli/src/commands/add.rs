use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use shelf_catalog::CatalogEntry;

use super::Session;
use crate::cli_types::AddArgs;
use crate::CliError;

/// Add one game to the acting user's collection.
pub(crate) fn run_add(session: &Session, args: AddArgs) -> Result<(), CliError> {
    let (conn, owner_id) = session.open()?;
    let entry = entry_from_args(&conn, owner_id, &args)?;

    let game_id = insert_with_tags(&conn, &entry)
        .map_err(|e| CliError::database(format!("Failed to add '{}': {}", entry.name, e)))?;

    log::info!(
        "{} Added {} (id {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        game_id,
    );
    Ok(())
}

/// Build a new entry from command-line metadata. Resource figures are clamped
/// into the accepted ranges; the genre must already exist.
fn entry_from_args(conn: &Connection, owner_id: i32, args: &AddArgs) -> Result<CatalogEntry, CliError> {
    let genre = match &args.genre {
        Some(name) => Some(
            shelf_db::find_genre_by_name(conn, name)
                .map_err(|e| CliError::database(e.to_string()))?
                .ok_or_else(|| CliError::unknown_genre(name))?,
        ),
        None => None,
    };

    let mut entry = CatalogEntry {
        name: args.name.trim().to_string(),
        disk_space: args.disk,
        ram_usage: args.ram,
        vram_required: args.vram,
        genre_id: genre.as_ref().map(|g| g.id),
        genre: genre.map(|g| g.name),
        completed: args.completed,
        url: args.url.clone(),
        owner_id,
        rating: args.rating,
        is_favorite: args.favorite,
        is_installed: args.installed,
        notes: args.notes.clone(),
        tags: shelf_catalog::join_tag_names(&shelf_catalog::split_tag_names(&args.tags)),
        ..CatalogEntry::default()
    };
    if entry.name.is_empty() {
        return Err(CliError::other("Game name must not be empty"));
    }
    entry.clamp_resources();
    Ok(entry)
}

fn insert_with_tags(conn: &Connection, entry: &CatalogEntry) -> Result<i32, shelf_db::OperationError> {
    let tx = conn.unchecked_transaction()?;
    let game_id = shelf_db::insert_game(&tx, entry)?;
    let mut tag_ids = Vec::new();
    for name in entry.tag_names() {
        let id = shelf_db::insert_or_get_tag(&tx, name, entry.owner_id)?;
        if !tag_ids.contains(&id) {
            tag_ids.push(id);
        }
    }
    shelf_db::set_game_tags(&tx, game_id, &tag_ids)?;
    tx.commit()?;
    Ok(game_id)
}

#[cfg(test)]
#[path = "../tests/add_tests.rs"]
mod tests;

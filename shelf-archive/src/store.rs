//! Seams between the archive code and a catalog store.
//!
//! Export pulls entries from an [`EntrySource`]; import pushes reconciled
//! entries into a [`CatalogSink`]. [`SqliteCatalog`] implements both over a
//! `shelf-db` connection.

use rusqlite::Connection;
use shelf_catalog::types::{CatalogEntry, GameFilter, ImportLog};
use shelf_db::operations::{self, OperationError};
use shelf_db::queries;

/// Supplies the ordered entries to export. Called once per export.
pub trait EntrySource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_entries(&mut self) -> Result<Vec<CatalogEntry>, Self::Error>;
}

/// Receives imported entries and resolves names to store ids.
pub trait CatalogSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a genre id by exact name. Genres are never created on import.
    fn resolve_genre_by_name(&mut self, name: &str) -> Result<Option<i32>, Self::Error>;

    /// Get the id of the owner's tag with this name, creating it if needed.
    ///
    /// Must be idempotent: a concurrent creator of the same tag is not an error.
    fn resolve_or_create_tag(&mut self, name: &str, owner_id: i32) -> Result<i32, Self::Error>;

    /// Store `entry` as a new entry linked to `tag_ids`. Returns its id.
    fn persist_new_entry(&mut self, entry: &CatalogEntry, tag_ids: &[i32]) -> Result<i32, Self::Error>;

    /// Record a finished import. Stores without an import history ignore it.
    fn record_import(&mut self, log: &ImportLog) -> Result<(), Self::Error> {
        let _ = log;
        Ok(())
    }
}

/// SQLite-backed source and sink for one owner's catalog.
pub struct SqliteCatalog<'conn> {
    conn: &'conn Connection,
    owner_id: i32,
    filter: Option<GameFilter>,
}

impl<'conn> SqliteCatalog<'conn> {
    pub fn new(conn: &'conn Connection, owner_id: i32) -> Self {
        Self {
            conn,
            owner_id,
            filter: None,
        }
    }

    /// Restrict exported entries to those matching `filter`.
    pub fn with_filter(mut self, filter: GameFilter) -> Self {
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }
}

impl EntrySource for SqliteCatalog<'_> {
    type Error = OperationError;

    fn fetch_entries(&mut self) -> Result<Vec<CatalogEntry>, OperationError> {
        match &self.filter {
            Some(filter) => queries::filtered_games(self.conn, self.owner_id, filter),
            None => queries::list_games(self.conn, self.owner_id),
        }
    }
}

impl CatalogSink for SqliteCatalog<'_> {
    type Error = OperationError;

    fn resolve_genre_by_name(&mut self, name: &str) -> Result<Option<i32>, OperationError> {
        Ok(operations::find_genre_by_name(self.conn, name)?.map(|g| g.id))
    }

    fn resolve_or_create_tag(&mut self, name: &str, owner_id: i32) -> Result<i32, OperationError> {
        operations::insert_or_get_tag(self.conn, name, owner_id)
    }

    fn persist_new_entry(&mut self, entry: &CatalogEntry, tag_ids: &[i32]) -> Result<i32, OperationError> {
        let tx = self.conn.unchecked_transaction()?;
        let game_id = operations::insert_game(&tx, entry)?;
        operations::set_game_tags(&tx, game_id, tag_ids)?;
        tx.commit()?;
        Ok(game_id)
    }

    fn record_import(&mut self, log: &ImportLog) -> Result<(), OperationError> {
        operations::insert_import_log(self.conn, log)?;
        Ok(())
    }
}

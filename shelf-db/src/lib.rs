//! SQLite persistence layer for the game collection.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    delete_game, ensure_user, find_genre_by_name, find_tag_by_name, find_user_by_name,
    insert_game, insert_genre, insert_import_log, insert_or_get_tag, seed_default_genres,
    set_game_tags, OperationError,
};
pub use queries::{
    filtered_games, game_stats, game_tag_ids, genre_stats, list_games, list_genres,
    list_import_logs, list_user_tags, tag_usage,
};
pub use schema::{open_database, open_memory, SchemaError};

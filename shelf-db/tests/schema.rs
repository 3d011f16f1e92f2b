use shelf_db::open_memory;
use shelf_db::schema::{create_schema, get_schema_version, migrate, CURRENT_VERSION};
use shelf_db::SchemaError;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "users",
        "genres",
        "tags",
        "games",
        "game_tags",
        "import_log",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "Table '{}' should exist", table);
    }
}

#[test]
fn newer_database_is_refused() {
    let conn = open_memory().unwrap();
    let err = migrate(&conn, CURRENT_VERSION + 1).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::VersionMismatch { expected, found }
            if expected == CURRENT_VERSION && found == CURRENT_VERSION + 1
    ));
}

#[test]
fn open_database_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");
    let conn = shelf_db::open_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    drop(conn);

    // Reopening an existing database leaves the version alone.
    let conn = shelf_db::open_database(&path).unwrap();
    let rows: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

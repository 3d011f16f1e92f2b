use super::*;

fn setup_db() -> (Connection, i32) {
    let conn = shelf_db::open_memory().unwrap();
    shelf_db::seed_default_genres(&conn).unwrap();
    let owner = shelf_db::ensure_user(&conn, "alice").unwrap();
    (conn, owner)
}

#[test]
fn truncate_respects_char_boundaries() {
    assert_eq!(truncate_str("Portal", 10), "Portal");
    assert_eq!(truncate_str("The Elder Scrolls V", 10), "The Eld...");
    assert_eq!(truncate_str("ééééé", 4), "é...");
    assert_eq!(truncate_str("abcdef", 2), "ab");
}

#[test]
fn rating_display() {
    assert_eq!(format_rating(Some(9)), "9/10");
    assert_eq!(format_rating(None), "-");
}

#[test]
fn empty_flags_build_empty_filter() {
    let (conn, owner) = setup_db();
    let filter = build_filter(&conn, owner, &FilterArgs::default()).unwrap();
    assert!(filter.is_empty());
}

#[test]
fn flags_map_onto_filter() {
    let (conn, owner) = setup_db();
    let tag = shelf_db::insert_or_get_tag(&conn, "coop", owner).unwrap();
    let args = FilterArgs {
        not_completed: true,
        genre: Some("Puzzle".to_string()),
        tag: Some("coop".to_string()),
        favorite: true,
        max_disk: Some(20.0),
        unrated: true,
        ..FilterArgs::default()
    };
    let filter = build_filter(&conn, owner, &args).unwrap();
    assert_eq!(filter.completed, Some(false));
    assert!(filter.genre_id.is_some());
    assert_eq!(filter.tag_id, Some(tag));
    assert_eq!(filter.favorite, Some(true));
    assert_eq!(filter.installed, None);
    assert_eq!(filter.disk_space_max, Some(20.0));
    assert_eq!(filter.has_rating, Some(false));
}

#[test]
fn unknown_genre_is_an_error() {
    let (conn, owner) = setup_db();
    let args = FilterArgs {
        genre: Some("Roguelike".to_string()),
        ..FilterArgs::default()
    };
    let err = build_filter(&conn, owner, &args).unwrap_err();
    assert!(matches!(err, CliError::UnknownName { kind: "genre", .. }));
}

#[test]
fn session_creates_database_and_user() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session {
        db_path: dir.path().join("nested").join("catalog.db"),
        username: "alice".to_string(),
        quiet: true,
    };
    let (conn, owner) = session.open().unwrap();
    assert!(session.db_path.exists());
    assert!(!shelf_db::list_genres(&conn).unwrap().is_empty());
    drop(conn);

    let (_, again) = session.open().unwrap();
    assert_eq!(owner, again);
}

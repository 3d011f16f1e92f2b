use shelf_catalog::types::*;
use shelf_db::*;

/// Seed a small collection for `alice`:
///
/// - Portal: Puzzle, rated 9, completed, favorite, installed, tags "short", "classic"
/// - Doom: Shooter, unrated, installed, tag "classic"
/// - Myst: Adventure, rated 6, no URL
fn setup_db() -> (rusqlite::Connection, i32) {
    let conn = open_memory().unwrap();
    seed_default_genres(&conn).unwrap();
    let owner = ensure_user(&conn, "alice").unwrap();

    let genre = |name: &str| find_genre_by_name(&conn, name).unwrap().map(|g| g.id);

    let portal = insert_game(
        &conn,
        &CatalogEntry {
            owner_id: owner,
            genre_id: genre("Puzzle"),
            disk_space: 12.0,
            ram_usage: 2.0,
            vram_required: 0.5,
            completed: true,
            rating: Some(9),
            is_favorite: true,
            is_installed: true,
            url: "https://store.example/portal".to_string(),
            ..CatalogEntry::new("Portal")
        },
    )
    .unwrap();
    let doom = insert_game(
        &conn,
        &CatalogEntry {
            owner_id: owner,
            genre_id: genre("Shooter"),
            disk_space: 3.0,
            ram_usage: 1.0,
            vram_required: 1.0,
            is_installed: true,
            url: "https://store.example/doom".to_string(),
            ..CatalogEntry::new("Doom")
        },
    )
    .unwrap();
    insert_game(
        &conn,
        &CatalogEntry {
            owner_id: owner,
            genre_id: genre("Adventure"),
            disk_space: 40.0,
            ram_usage: 8.0,
            vram_required: 4.0,
            rating: Some(6),
            ..CatalogEntry::new("Myst")
        },
    )
    .unwrap();

    let short = insert_or_get_tag(&conn, "short", owner).unwrap();
    let classic = insert_or_get_tag(&conn, "classic", owner).unwrap();
    set_game_tags(&conn, portal, &[short, classic]).unwrap();
    set_game_tags(&conn, doom, &[classic]).unwrap();

    (conn, owner)
}

fn names(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn list_games_ordered_with_genre_and_tags() {
    let (conn, owner) = setup_db();
    let games = list_games(&conn, owner).unwrap();
    assert_eq!(names(&games), vec!["Doom", "Myst", "Portal"]);

    let portal = &games[2];
    assert_eq!(portal.genre.as_deref(), Some("Puzzle"));
    assert_eq!(portal.tags, "classic, short");
    assert_eq!(portal.rating, Some(9));
    assert!(portal.completed && portal.is_favorite && portal.is_installed);

    let doom = &games[0];
    assert_eq!(doom.rating, None);
    assert_eq!(doom.tags, "classic");

    assert_eq!(games[1].tags, "");
}

#[test]
fn list_games_only_returns_owner_entries() {
    let (conn, _) = setup_db();
    let bob = ensure_user(&conn, "bob").unwrap();
    assert!(list_games(&conn, bob).unwrap().is_empty());
}

#[test]
fn filter_by_flags() {
    let (conn, owner) = setup_db();

    let filter = GameFilter {
        installed: Some(true),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Doom", "Portal"]);

    let filter = GameFilter {
        completed: Some(false),
        favorite: Some(false),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Doom", "Myst"]);
}

#[test]
fn filter_by_resource_ranges() {
    let (conn, owner) = setup_db();
    let filter = GameFilter {
        disk_space_min: Some(3.0),
        disk_space_max: Some(12.0),
        vram_max: Some(0.75),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Portal"]);

    let filter = GameFilter {
        ram_min: Some(2.0),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Myst", "Portal"]);
}

#[test]
fn filter_by_genre_and_tag() {
    let (conn, owner) = setup_db();
    let shooter = find_genre_by_name(&conn, "Shooter").unwrap().unwrap();
    let filter = GameFilter {
        genre_id: Some(shooter.id),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Doom"]);

    let classic = find_tag_by_name(&conn, "classic", owner).unwrap().unwrap();
    let filter = GameFilter {
        tag_id: Some(classic.id),
        ..GameFilter::default()
    };
    let games = filtered_games(&conn, owner, &filter).unwrap();
    assert_eq!(names(&games), vec!["Doom", "Portal"]);
    // The tag filter narrows rows, not the aggregated tag string.
    assert_eq!(games[1].tags, "classic, short");
}

#[test]
fn filter_by_rating() {
    let (conn, owner) = setup_db();
    let filter = GameFilter {
        has_rating: Some(false),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Doom"]);

    let filter = GameFilter {
        rating_max: Some(7),
        ..GameFilter::default()
    };
    // Unrated entries never satisfy a rating bound.
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Myst"]);

    let filter = GameFilter {
        rating_min: Some(7),
        has_rating: Some(true),
        ..GameFilter::default()
    };
    assert_eq!(names(&filtered_games(&conn, owner, &filter).unwrap()), vec!["Portal"]);
}

#[test]
fn filter_values_are_bound_not_interpolated() {
    let (conn, owner) = setup_db();
    let filter = GameFilter {
        genre_id: Some(-1),
        ..GameFilter::default()
    };
    assert!(filtered_games(&conn, owner, &filter).unwrap().is_empty());
}

#[test]
fn stats_summary() {
    let (conn, owner) = setup_db();
    let stats = game_stats(&conn, owner).unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.favorites, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.unrated, 1);
    assert_eq!(stats.installed, 2);
    assert_eq!(stats.installed_disk_space, 15.0);
    assert_eq!(stats.without_url, 1);
}

#[test]
fn stats_for_empty_collection() {
    let conn = open_memory().unwrap();
    let owner = ensure_user(&conn, "nobody").unwrap();
    assert_eq!(game_stats(&conn, owner).unwrap(), GameStats::default());
    assert!(genre_stats(&conn, owner).unwrap().is_empty());
}

#[test]
fn genre_stats_skip_empty_genres() {
    let (conn, owner) = setup_db();
    let puzzle = find_genre_by_name(&conn, "Puzzle").unwrap().unwrap();
    insert_game(
        &conn,
        &CatalogEntry {
            owner_id: owner,
            genre_id: Some(puzzle.id),
            disk_space: 1.0,
            ..CatalogEntry::new("Tetris")
        },
    )
    .unwrap();

    let stats = genre_stats(&conn, owner).unwrap();
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].genre_name, "Puzzle");
    assert_eq!(stats[0].games, 2);
    assert_eq!(stats[0].completed, 1);
    // Tetris is unrated and excluded from the average.
    assert_eq!(stats[0].avg_rating, 9.0);
    assert_eq!(stats[0].total_disk_space, 13.0);

    let shooter = stats.iter().find(|s| s.genre_name == "Shooter").unwrap();
    assert_eq!(shooter.avg_rating, 0.0);
}

#[test]
fn tag_usage_counts() {
    let (conn, owner) = setup_db();
    insert_or_get_tag(&conn, "unused", owner).unwrap();
    let usage = tag_usage(&conn, owner).unwrap();
    let pairs: Vec<(&str, i64)> = usage.iter().map(|u| (u.name.as_str(), u.count)).collect();
    assert_eq!(pairs, vec![("classic", 2), ("short", 1), ("unused", 0)]);
}

#[test]
fn user_tags_listing() {
    let (conn, owner) = setup_db();
    let tags = list_user_tags(&conn, owner).unwrap();
    let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["classic", "short"]);
}

#[test]
fn import_logs_newest_first_with_limit() {
    let (conn, owner) = setup_db();
    for (i, stamp) in ["2024-01-01T00:00:00+00:00", "2024-02-01T00:00:00+00:00"].iter().enumerate() {
        insert_import_log(
            &conn,
            &ImportLog {
                id: 0,
                source_name: format!("file{i}.tmp"),
                owner_id: owner,
                imported_at: stamp.to_string(),
                records_total: 1,
                records_imported: 1,
                records_failed: 0,
            },
        )
        .unwrap();
    }
    let logs = list_import_logs(&conn, Some(1)).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "file1.tmp");
}

//! Data model types for the game collection.
//!
//! These types mirror the persistent schema: users, genres, per-user tags,
//! and the catalog entries themselves, plus the filter and statistics rows
//! produced by the query layer.

use serde::{Deserialize, Serialize};

// ── Resource Limits ─────────────────────────────────────────────────────────

/// Upper bound for disk space, in GB.
pub const MAX_DISK_SPACE: f64 = 500.0;
/// Upper bound for RAM usage, in GB.
pub const MAX_RAM_USAGE: f64 = 128.0;
/// Upper bound for required video memory, in GB.
pub const MAX_VRAM_REQUIRED: f64 = 48.0;

pub const MIN_DISK_SPACE: f64 = 0.1;
pub const MIN_RAM_USAGE: f64 = 0.5;
pub const MIN_VRAM_REQUIRED: f64 = 0.5;

/// Highest accepted rating. Ratings run from 0 to this value inclusive.
pub const MAX_RATING: i32 = 10;

/// Stored rating value meaning "not rated".
pub const UNRATED: i32 = -1;

// ── User ────────────────────────────────────────────────────────────────────

/// An owner of catalog entries and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

// ── Genre ───────────────────────────────────────────────────────────────────

/// A shared genre definition. Genres are global, not per-user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Genres seeded into an empty database.
pub const DEFAULT_GENRES: &[(&str, &str)] = &[
    ("Action", "Action games focused on combat"),
    ("Adventure", "Exploration and puzzle-driven adventures"),
    ("RPG", "Role-playing games with character progression"),
    ("Strategy", "Tactical and strategic planning games"),
    ("Simulation", "Simulations of real-world activities"),
    ("Sports", "Sports games"),
    ("Racing", "Racing games"),
    ("Puzzle", "Puzzles and logic games"),
    ("Horror", "Horror games"),
    ("Shooter", "First- and third-person shooters"),
    ("Fighting", "Fighting games"),
    ("Platformer", "Platformers"),
    ("Sandbox", "Open-world sandboxes"),
    ("MMO", "Massively multiplayer online games"),
    ("Visual Novel", "Visual novels"),
    ("Other", "Everything else"),
];

// ── Tag ─────────────────────────────────────────────────────────────────────

/// Default display color for newly created tags.
pub const DEFAULT_TAG_COLOR: &str = "#808080";

/// A user-owned label. Names are unique per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub owner_id: i32,
    pub color: String,
}

// ── Catalog Entry ───────────────────────────────────────────────────────────

/// One game in a user's collection.
///
/// `genre` carries the genre's display name alongside `genre_id` so the
/// entry can be exchanged between stores that assign different ids. `tags`
/// is the aggregated tag string (names joined with `", "`); the persisted
/// tag links live in the store, not on the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
    /// Disk space in GB.
    pub disk_space: f64,
    /// RAM usage in GB.
    pub ram_usage: f64,
    /// Required video memory in GB.
    pub vram_required: f64,
    pub genre_id: Option<i32>,
    pub genre: Option<String>,
    pub completed: bool,
    pub url: String,
    pub owner_id: i32,
    /// `None` means unrated; otherwise 0..=10.
    pub rating: Option<i32>,
    pub is_favorite: bool,
    pub is_installed: bool,
    pub notes: String,
    pub tags: String,
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            disk_space: 0.0,
            ram_usage: 0.0,
            vram_required: 0.0,
            genre_id: None,
            genre: None,
            completed: false,
            url: String::new(),
            owner_id: 0,
            rating: None,
            is_favorite: false,
            is_installed: false,
            notes: String::new(),
            tags: String::new(),
        }
    }
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Tag names from the aggregated tag string, trimmed, empties dropped.
    pub fn tag_names(&self) -> Vec<&str> {
        crate::tags::split_tag_names(&self.tags)
    }

    /// Whether the rating is the unrated sentinel or within 0..=10.
    pub fn has_valid_rating(&self) -> bool {
        match self.rating {
            None => true,
            Some(r) => (0..=MAX_RATING).contains(&r),
        }
    }

    /// Clamp the resource metrics into the accepted UI ranges.
    ///
    /// Used when entries are created interactively. Exchange files carry
    /// metrics verbatim and never pass through this.
    pub fn clamp_resources(&mut self) {
        self.disk_space = self.disk_space.clamp(MIN_DISK_SPACE, MAX_DISK_SPACE);
        self.ram_usage = self.ram_usage.clamp(MIN_RAM_USAGE, MAX_RAM_USAGE);
        self.vram_required = self.vram_required.clamp(MIN_VRAM_REQUIRED, MAX_VRAM_REQUIRED);
    }
}

// ── Filter ──────────────────────────────────────────────────────────────────

/// Optional predicates for narrowing a user's catalog.
///
/// Every `None` field is ignored. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilter {
    pub completed: Option<bool>,
    pub genre_id: Option<i32>,
    pub disk_space_min: Option<f64>,
    pub disk_space_max: Option<f64>,
    pub ram_min: Option<f64>,
    pub ram_max: Option<f64>,
    pub vram_min: Option<f64>,
    pub vram_max: Option<f64>,
    pub tag_id: Option<i32>,
    pub favorite: Option<bool>,
    pub installed: Option<bool>,
    pub rating_min: Option<i32>,
    pub rating_max: Option<i32>,
    /// `Some(true)`: only rated entries. `Some(false)`: only unrated ones.
    pub has_rating: Option<bool>,
}

impl GameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary counts for one user's collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameStats {
    pub total: i64,
    pub favorites: i64,
    pub completed: i64,
    pub unrated: i64,
    pub installed: i64,
    /// Sum of disk space over installed entries, in GB.
    pub installed_disk_space: f64,
    pub without_url: i64,
}

/// Per-genre aggregates for one user's collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreStats {
    pub genre_id: i32,
    pub genre_name: String,
    pub games: i64,
    pub completed: i64,
    /// Average over rated entries only; 0.0 when none are rated.
    pub avg_rating: f64,
    pub total_disk_space: f64,
}

/// How many entries carry a given tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagUsage {
    pub name: String,
    pub count: i64,
}

/// A recorded exchange-file import.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub owner_id: i32,
    pub imported_at: String,
    pub records_total: i64,
    pub records_imported: i64,
    pub records_failed: i64,
}

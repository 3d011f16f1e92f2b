//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Manage a personal game collection and its archive files", long_about = None)]
pub(crate) struct Cli {
    /// Path to the collection database (default: <data dir>/shelf/catalog.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Act as this user (created on first use)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Predicates for narrowing the collection, shared by `list` and `export`.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Only completed games
    #[arg(long, conflicts_with = "not_completed")]
    pub completed: bool,

    /// Only games not yet completed
    #[arg(long)]
    pub not_completed: bool,

    /// Only games in this genre (exact name)
    #[arg(long)]
    pub genre: Option<String>,

    /// Only games carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only favorites
    #[arg(long)]
    pub favorite: bool,

    /// Only installed games
    #[arg(long)]
    pub installed: bool,

    /// Minimum disk space in GB
    #[arg(long)]
    pub min_disk: Option<f64>,

    /// Maximum disk space in GB
    #[arg(long)]
    pub max_disk: Option<f64>,

    /// Minimum RAM usage in GB
    #[arg(long)]
    pub min_ram: Option<f64>,

    /// Maximum RAM usage in GB
    #[arg(long)]
    pub max_ram: Option<f64>,

    /// Minimum VRAM in GB
    #[arg(long)]
    pub min_vram: Option<f64>,

    /// Maximum VRAM in GB
    #[arg(long)]
    pub max_vram: Option<f64>,

    /// Minimum rating (unrated games never match)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=10))]
    pub min_rating: Option<i32>,

    /// Maximum rating (unrated games never match)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=10))]
    pub max_rating: Option<i32>,

    /// Only rated games
    #[arg(long, conflicts_with = "unrated")]
    pub rated: bool,

    /// Only unrated games
    #[arg(long)]
    pub unrated: bool,
}

/// Metadata for a new collection entry.
#[derive(Args, Clone)]
pub(crate) struct AddArgs {
    /// Game name (unique per user)
    pub name: String,

    /// Disk space in GB
    #[arg(long, default_value_t = 1.0)]
    pub disk: f64,

    /// RAM usage in GB
    #[arg(long, default_value_t = 1.0)]
    pub ram: f64,

    /// VRAM in GB
    #[arg(long, default_value_t = 1.0)]
    pub vram: f64,

    /// Genre name (must already exist; see `shelf genres`)
    #[arg(long)]
    pub genre: Option<String>,

    /// Rating from 0 to 10
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=10))]
    pub rating: Option<i32>,

    /// Store or homepage URL
    #[arg(long, default_value = "")]
    pub url: String,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Comma-separated tags (created as needed)
    #[arg(long, default_value = "")]
    pub tags: String,

    #[arg(long)]
    pub completed: bool,

    #[arg(long)]
    pub favorite: bool,

    #[arg(long)]
    pub installed: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write the collection (or a filtered part of it) to an archive file
    Export {
        /// Destination archive file
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Write directly to the destination instead of via a temporary file
        #[arg(long)]
        in_place: bool,
    },

    /// Check an archive file's header and checksum
    Verify {
        /// Archive file to check
        file: PathBuf,
    },

    /// Import a verified archive file into the collection
    Import {
        /// Archive file to import
        file: PathBuf,
    },

    /// Show the contents of an archive file without importing it
    View {
        /// Archive file to read
        file: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a game to the collection
    Add(AddArgs),

    /// List games in the collection
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show collection statistics
    Stats,

    /// List known genres
    Genres,

    /// Show recent imports
    History {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and their sources
    Show,

    /// Print the settings file path
    Path,

    /// Set the default database path
    SetDb {
        /// Database file path
        path: PathBuf,
    },

    /// Set the default user
    SetUser {
        /// User name
        name: String,
    },
}

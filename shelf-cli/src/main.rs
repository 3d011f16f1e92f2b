//! shelf CLI
//!
//! Command-line interface for managing a game collection and exchanging it
//! through verified archive files.

mod cli_types;
mod commands;
mod error;
mod progress;
mod settings;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Session;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose, stdout_is_data(&cli.command));

    let settings = settings::load_settings();
    let (db_path, _) = settings::resolve_db_path(cli.db.clone(), &settings);
    let (username, _) = settings::resolve_user(cli.user.clone(), &settings);
    let session = Session {
        db_path,
        username,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Export {
            file,
            filter,
            in_place,
        } => commands::export::run_export(&session, &file, &filter, in_place),
        Commands::Verify { file } => commands::verify::run_verify(&file),
        Commands::Import { file } => commands::import::run_import(&session, &file),
        Commands::View { file, json } => commands::view::run_view(&file, json),
        Commands::Add(args) => commands::add::run_add(&session, args),
        Commands::List { filter } => commands::list::run_list(&session, &filter),
        Commands::Stats => commands::stats::run_stats(&session),
        Commands::Genres => commands::genres::run_genres(&session),
        Commands::History { limit } => commands::history::run_history(&session, limit),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.db, cli.user),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(&path),
            ConfigAction::SetUser { name } => commands::config::run_config_set_user(&name),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Whether the command prints machine-readable output on stdout, in which
/// case log lines must go to stderr.
fn stdout_is_data(command: &Commands) -> bool {
    matches!(
        command,
        Commands::View { json: true, .. }
            | Commands::Config {
                action: ConfigAction::Path
            }
    )
}

/// Install the logger that carries all user-facing output.
///
/// Info lines are printed bare, warnings and errors get a colored prefix,
/// and debug/trace lines (only with `--verbose` or `RUST_LOG`) get a
/// timestamp and target. With `to_stderr` every line goes to stderr.
fn init_logger(quiet: bool, verbose: bool, to_stderr: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let (target, stream) = if to_stderr {
        (env_logger::Target::Stderr, Stream::Stderr)
    } else {
        (env_logger::Target::Stdout, Stream::Stdout)
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .format(move |buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(stream, |t| t.yellow()),
                record.args()
            ),
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(stream, |t| t.red()),
                record.args()
            ),
            level => writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp(),
                level,
                record.target(),
                record.args()
            ),
        })
        .init();
}

/// Print an empty line through the logger so `--quiet` suppresses it too.
pub(crate) fn log_blank() {
    log::info!("");
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

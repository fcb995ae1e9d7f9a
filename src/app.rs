//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging and the async runtime
//! - builds the store client
//! - dispatches to the pipeline + text printers, or the TUI

use chrono::Utc;
use clap::Parser;
use tokio::runtime::{Builder, Runtime};

use crate::cli::{Cli, Command, GridArgs, ListArgs, ShowArgs, TuiArgs};
use crate::data::store::HttpStore;
use crate::error::{AppError, EXIT_DATA};

pub mod pipeline;

/// Entry point for the `fredterm` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `fredterm` (and `fredterm -c debt`) to behave like
    // `fredterm tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the short launch UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::List(args) => handle_list(args),
        Command::Grid(args) => handle_grid(args),
        Command::Show(args) => handle_show(args),
    }
}

/// Cooperative single-threaded runtime: the fetch fan-out is I/O-bound and
/// suspends rather than parallelizes.
fn build_runtime() -> Result<Runtime, AppError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(EXIT_DATA, format!("Failed to start async runtime: {e}")))
}

/// Library modules log through the `log` facade; the fmt subscriber consumes
/// those records and writes to stderr so stdout stays a clean table stream.
/// TUI mode skips this entirely (log lines would corrupt the screen).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing_subscriber::filter::LevelFilter::WARN)
        .init();
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let store = HttpStore::from_env()?;
    let runtime = build_runtime()?;
    crate::tui::run(runtime, store, &args.category)
}

fn handle_list(args: ListArgs) -> Result<(), AppError> {
    init_logging();
    let store = HttpStore::from_env()?;
    let runtime = build_runtime()?;

    let rows = runtime.block_on(crate::data::catalog::list_by_category(
        &store,
        &args.category,
    ))?;

    if rows.is_empty() {
        println!("No series match category '{}'.", args.category);
        return Ok(());
    }
    print!("{}", crate::report::format_catalog_table(&rows));
    Ok(())
}

fn handle_grid(args: GridArgs) -> Result<(), AppError> {
    init_logging();
    let store = HttpStore::from_env()?;
    let runtime = build_runtime()?;

    let grid = runtime.block_on(pipeline::load_terminal_grid(&store, args.size))?;
    print!("{}", crate::report::format_grid_table(&grid));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    init_logging();
    let store = HttpStore::from_env()?;
    let runtime = build_runtime()?;
    let today = Utc::now().date_naive();

    let meta = runtime
        .block_on(pipeline::find_series(&store, &args.series))?
        .ok_or_else(|| {
            AppError::new(EXIT_DATA, format!("Unknown series id '{}'.", args.series))
        })?;

    let windows = crate::domain::window_options(&meta.frequency);
    let active = args.window.min(windows.len() - 1);
    let points = runtime.block_on(crate::data::points::fetch_window(
        &store,
        &meta.id,
        windows[active].months,
        today,
    ));

    print!(
        "{}",
        crate::report::format_series_detail(&meta, &windows, active, &points)
    );
    Ok(())
}

/// Rewrite argv so `fredterm` defaults to `fredterm tui`.
///
/// Rules:
/// - `fredterm`                    -> `fredterm tui`
/// - `fredterm -c debt ...`        -> `fredterm tui -c debt ...`
/// - `fredterm --help/--version`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "list" | "grid" | "show");
    if is_subcommand {
        return argv;
    }

    // A leading flag means "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_tui() {
        assert_eq!(rewrite_args(argv(&["fredterm"])), argv(&["fredterm", "tui"]));
    }

    #[test]
    fn leading_flag_becomes_tui_flag() {
        assert_eq!(
            rewrite_args(argv(&["fredterm", "-c", "debt"])),
            argv(&["fredterm", "tui", "-c", "debt"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["fredterm", "list"])),
            argv(&["fredterm", "list"])
        );
        assert_eq!(
            rewrite_args(argv(&["fredterm", "--help"])),
            argv(&["fredterm", "--help"])
        );
    }
}

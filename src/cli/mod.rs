//! Command-line parsing for the indicator terminal.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the selection/fetch code.

use clap::{Parser, Subcommand};

use crate::data::sample::GRID_SERIES_TARGET;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fredterm",
    version,
    about = "Economic indicator terminal (store-backed charts and grid)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (chart view + dense grid view).
    ///
    /// This uses the same pipeline as `list`/`grid`/`show`, but renders
    /// results in a terminal UI using Ratatui.
    Tui(TuiArgs),
    /// Print the series catalog, optionally filtered by category.
    List(ListArgs),
    /// Print the dense grid once and exit (useful for scripting).
    Grid(GridArgs),
    /// Print recent observations for one series.
    Show(ShowArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Category substring filter for the chart view (case-insensitive).
    #[arg(short, long, default_value = "")]
    pub category: String,
}

#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Category substring filter (case-insensitive); empty matches all.
    #[arg(short, long, default_value = "")]
    pub category: String,
}

#[derive(Debug, Parser, Clone)]
pub struct GridArgs {
    /// Number of series in the grid.
    #[arg(long, default_value_t = GRID_SERIES_TARGET)]
    pub size: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Series id (case-insensitive).
    pub series: String,

    /// Look-back choice: 0 = shorter window, 1 = longer window.
    #[arg(short, long, default_value_t = 0)]
    pub window: usize,
}

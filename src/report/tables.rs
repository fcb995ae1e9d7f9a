//! Fixed-width text tables for the CLI front-end.
//!
//! The TUI draws widgets; these render the same pipeline output as plain
//! stdout tables for scripting and quick checks.

use crate::app::pipeline::{Dashboard, GridRow, TerminalGrid};
use crate::domain::{Direction, Emphasis, Observation, SeriesMeta, TimeWindow, Trend};
use crate::report::format::{format_date_long, format_date_short, format_grid_value, format_value};

/// Render the catalog listing, most popular first.
pub fn format_catalog_table(rows: &[SeriesMeta]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<40} {:<18} {:<16} {:<14} {:>6}\n",
        "id", "title", "units", "frequency", "category", "pop"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<40} {:-<18} {:-<16} {:-<14} {:-<6}\n",
        "", "", "", "", "", ""
    ));

    for meta in rows {
        out.push_str(&format!(
            "{:<12} {:<40} {:<18} {:<16} {:<14} {:>6}\n",
            truncate(&meta.id, 12),
            truncate(&meta.title, 40),
            truncate(&meta.units, 18),
            truncate(&meta.frequency, 16),
            truncate(&meta.category, 14),
            meta.popularity,
        ));
    }

    out
}

/// Render the dense grid: SERIES ID / DATE / VALUE / CHG.
///
/// The CHG column encodes the trend: `+`/`-` for the latest direction,
/// doubled for a medium two-step move and tripled for a high one. Rows with
/// no data show `N/A` like the interactive grid.
pub fn format_grid_table(grid: &TerminalGrid) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<10} {:>14} {:<4}\n",
        "SERIES ID", "DATE", "VALUE", "CHG"
    ));
    out.push_str(&format!("{:-<12} {:-<10} {:-<14} {:-<4}\n", "", "", "", ""));

    for row in &grid.rows {
        out.push_str(&format_grid_row(row));
    }

    out
}

fn format_grid_row(row: &GridRow) -> String {
    match row.latest {
        Some(obs) => format!(
            "{:<12} {:<10} {:>14} {:<4}\n",
            truncate(&row.meta.id, 12),
            format_date_short(obs.date),
            format_grid_value(obs.value),
            trend_marker(row.trend),
        ),
        None => format!(
            "{:<12} {:<10} {:>14} {:<4}\n",
            truncate(&row.meta.id, 12),
            "N/A",
            "",
            "",
        ),
    }
}

/// Render one series: identity header, window options, recent observations.
pub fn format_series_detail(
    meta: &SeriesMeta,
    windows: &[TimeWindow; 2],
    active_window: usize,
    points: &[Observation],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} - {}\n", meta.id, meta.title));
    out.push_str(&format!(
        "{} | {} | {}\n",
        meta.units, meta.frequency, meta.category
    ));

    let window = windows[active_window];
    out.push_str(&format!(
        "Windows: {} {} (showing {}, {} months)\n",
        windows[0].label, windows[1].label, window.label, window.months
    ));

    if points.is_empty() {
        out.push_str("\nNo data in this window.\n");
        return out;
    }

    let first = points[0];
    let last = points[points.len() - 1];
    out.push_str(&format!(
        "{} observations, {} to {}\n\n",
        points.len(),
        format_date_long(first.date),
        format_date_long(last.date),
    ));

    // Most recent dozen, newest last like the chart reads.
    let tail_start = points.len().saturating_sub(12);
    for obs in &points[tail_start..] {
        out.push_str(&format!(
            "{:<14} {:>14}\n",
            format_date_long(obs.date),
            format_value(obs.value, Some(&meta.units)),
        ));
    }

    out
}

/// One-line dashboard summary used by the TUI status bar and tests.
pub fn dashboard_summary(dashboard: &Dashboard) -> String {
    let with_data = dashboard.panels.iter().filter(|p| !p.points.is_empty()).count();
    let filter = if dashboard.category.is_empty() {
        "all categories".to_string()
    } else {
        format!("category '{}'", dashboard.category)
    };
    format!(
        "{} series in {}, {} with data",
        dashboard.panels.len(),
        filter,
        with_data
    )
}

fn trend_marker(trend: Trend) -> &'static str {
    let Trend {
        direction,
        emphasis,
    } = trend;
    match (direction, emphasis) {
        (Direction::Flat, _) => "",
        (Direction::Up, Emphasis::High) => "+++",
        (Direction::Up, Emphasis::Medium) => "++",
        (Direction::Up, Emphasis::None) => "+",
        (Direction::Down, Emphasis::High) => "---",
        (Direction::Down, Emphasis::Medium) => "--",
        (Direction::Down, Emphasis::None) => "-",
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

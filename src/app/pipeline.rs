//! Shared view-assembly pipeline used by the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! catalog -> window resolution / balanced sampling -> per-series fetch
//! fan-out -> trend classification
//!
//! The front-ends then focus on presentation (printing vs widgets).
//!
//! Per-series fetches fan out concurrently under a single future; dropping
//! that future (a torn-down view, an abandoned refresh) cancels every fetch
//! still in flight. There are no retries and no caching: every call
//! re-issues the full fetch sequence.

use chrono::NaiveDate;
use futures::future::join_all;

use crate::data::catalog::{self, CatalogUnavailable};
use crate::data::points;
use crate::data::sample::sample_evenly;
use crate::data::store::SeriesStore;
use crate::domain::{Observation, SeriesMeta, TimeWindow, Trend, classify, window_options};

/// One chart card: a series, its two look-back windows, and the fetched
/// observations for the selected window.
#[derive(Debug, Clone)]
pub struct SeriesPanel {
    pub meta: SeriesMeta,
    pub windows: [TimeWindow; 2],
    /// Index into `windows` the points were fetched with.
    pub active_window: usize,
    /// Ascending by date; empty when the series has no data in the window
    /// or its table is unavailable.
    pub points: Vec<Observation>,
}

/// Chart view data: one panel per catalog entry matching the filter,
/// most popular first.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub category: String,
    pub panels: Vec<SeriesPanel>,
}

/// One cell row of the terminal grid view.
#[derive(Debug, Clone)]
pub struct GridRow {
    pub meta: SeriesMeta,
    pub latest: Option<Observation>,
    pub previous: Option<f64>,
    pub two_back: Option<f64>,
    pub trend: Trend,
}

/// Terminal view data, in selection (grouped-then-padded) order.
#[derive(Debug, Clone)]
pub struct TerminalGrid {
    pub rows: Vec<GridRow>,
}

/// Assemble the chart view for a category filter.
pub async fn load_dashboard<S: SeriesStore>(
    store: &S,
    category: &str,
    window_choice: usize,
    today: NaiveDate,
) -> Result<Dashboard, CatalogUnavailable> {
    // 1) Catalog lookup; failure here is the only fatal outcome.
    let catalog = catalog::list_by_category(store, category).await?;

    // 2) Fan out one windowed fetch per series.
    let panels = join_all(catalog.into_iter().map(|meta| async move {
        let windows = window_options(&meta.frequency);
        let active_window = window_choice.min(windows.len() - 1);
        let points =
            points::fetch_window(store, &meta.id, windows[active_window].months, today).await;
        SeriesPanel {
            meta,
            windows,
            active_window,
            points,
        }
    }))
    .await;

    Ok(Dashboard {
        category: category.to_string(),
        panels,
    })
}

/// Assemble the terminal grid: a category-balanced selection with the three
/// most recent observations per series classified into a trend.
///
/// Completions are unordered but rows stay aligned with selection order.
pub async fn load_terminal_grid<S: SeriesStore>(
    store: &S,
    target: usize,
) -> Result<TerminalGrid, CatalogUnavailable> {
    // 1) Whole catalog, then balance across categories.
    let catalog = catalog::list_by_category(store, "").await?;
    let picked = sample_evenly(&catalog, target);

    // 2) Fan out the recent-3 fetches.
    let rows = join_all(picked.into_iter().map(|meta| async move {
        let recent = points::fetch_recent(store, &meta.id, 3).await;
        let latest = recent.first().copied();
        let previous = recent.get(1).map(|o| o.value);
        let two_back = recent.get(2).map(|o| o.value);
        let trend = match latest {
            Some(obs) => classify(obs.value, previous, two_back),
            None => Trend::flat(),
        };
        GridRow {
            meta,
            latest,
            previous,
            two_back,
            trend,
        }
    }))
    .await;

    Ok(TerminalGrid { rows })
}

/// Case-insensitive catalog lookup for one series id.
pub async fn find_series<S: SeriesStore>(
    store: &S,
    series_id: &str,
) -> Result<Option<SeriesMeta>, CatalogUnavailable> {
    let catalog = catalog::list_by_category(store, "").await?;
    Ok(catalog
        .into_iter()
        .find(|m| m.id.eq_ignore_ascii_case(series_id)))
}

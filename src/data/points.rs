//! Point-series retrieval: look-back windowing and null filtering.
//!
//! Failures are contained at the smallest possible unit:
//!
//! - a failed per-series query (absent table, transport error) degrades to
//!   an empty vector, logged at warn level, so sibling series keep rendering
//! - a single null or unparseable value drops that row only, at debug level
//!
//! Callers must treat a zero-length result as "no data", never as an error.

use chrono::{Months, NaiveDate};
use log::{debug, warn};

use crate::data::store::{RawObservation, RawValue, SeriesStore};
use crate::domain::Observation;

/// First date inside a `lookback_months` window ending at `today`.
///
/// Calendar-month arithmetic with chrono's day clamping: Mar 31 minus one
/// month is the last day of February. A look-back longer than the calendar
/// can express clamps to the epoch floor.
pub fn cutoff_date(today: NaiveDate, lookback_months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(lookback_months))
        .unwrap_or(NaiveDate::MIN)
}

/// Observations for `series_id` within the trailing look-back window,
/// ascending by date.
pub async fn fetch_window<S: SeriesStore>(
    store: &S,
    series_id: &str,
    lookback_months: u32,
    today: NaiveDate,
) -> Vec<Observation> {
    let cutoff = cutoff_date(today, lookback_months);
    match store.observations_since(series_id, cutoff).await {
        Ok(rows) => normalize(series_id, rows),
        Err(err) => {
            warn!("series data unavailable for {series_id}: {err}");
            Vec::new()
        }
    }
}

/// The most recent `count` observations for `series_id`, most recent first.
///
/// The terminal grid reads three of these per series to classify the latest
/// move.
pub async fn fetch_recent<S: SeriesStore>(
    store: &S,
    series_id: &str,
    count: usize,
) -> Vec<Observation> {
    match store.recent_observations(series_id, count).await {
        Ok(rows) => normalize(series_id, rows),
        Err(err) => {
            warn!("series data unavailable for {series_id}: {err}");
            Vec::new()
        }
    }
}

/// Drop null and unparseable values, keeping row order.
fn normalize(series_id: &str, rows: Vec<RawObservation>) -> Vec<Observation> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(raw) = row.value else {
            continue; // null at the source
        };
        match numeric_value(&raw) {
            Some(value) => out.push(Observation {
                date: row.date,
                value,
            }),
            None => debug!("dropping unparseable value for {series_id} at {}", row.date),
        }
    }
    out
}

/// Numeric normalization for raw store values.
///
/// The ingestion source writes "." for missing numbers; non-finite values
/// are treated the same way.
fn numeric_value(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(v) => v.is_finite().then_some(*v),
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed == "." || trimmed.is_empty() {
                return None;
            }
            let v = trimmed.parse::<f64>().ok()?;
            v.is_finite().then_some(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::FakeStore;

    #[test]
    fn cutoff_subtracts_calendar_months() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        assert_eq!(
            cutoff_date(today, 6),
            NaiveDate::from_ymd_opt(2025, 2, 6).unwrap()
        );
        assert_eq!(
            cutoff_date(today, 120),
            NaiveDate::from_ymd_opt(2015, 8, 6).unwrap()
        );
    }

    #[test]
    fn cutoff_clamps_short_months() {
        let eom = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            cutoff_date(eom, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn numeric_value_accepts_numbers_and_strings() {
        assert_eq!(numeric_value(&RawValue::Number(3.25)), Some(3.25));
        assert_eq!(numeric_value(&RawValue::Text("3.25".into())), Some(3.25));
        assert_eq!(numeric_value(&RawValue::Text(" 3.25 ".into())), Some(3.25));
    }

    #[test]
    fn numeric_value_rejects_placeholders() {
        assert_eq!(numeric_value(&RawValue::Text(".".into())), None);
        assert_eq!(numeric_value(&RawValue::Text("".into())), None);
        assert_eq!(numeric_value(&RawValue::Text("n/a".into())), None);
        assert_eq!(numeric_value(&RawValue::Number(f64::NAN)), None);
    }

    #[tokio::test]
    async fn window_filters_nulls_and_keeps_order() {
        let mut store = FakeStore::default();
        store.observations.insert(
            "unrate".to_string(),
            vec![
                FakeStore::row(FakeStore::day(1), Some(4.0)),
                FakeStore::row(FakeStore::day(2), None),
                FakeStore::row(FakeStore::day(3), Some(4.1)),
                FakeStore::row(FakeStore::day(4), None),
                FakeStore::row(FakeStore::day(5), Some(4.2)),
            ],
        );

        let points = fetch_window(&store, "UNRATE", 24, FakeStore::day(31)).await;
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, [4.0, 4.1, 4.2]);
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn window_respects_cutoff() {
        let mut store = FakeStore::default();
        store.observations.insert(
            "unrate".to_string(),
            vec![
                FakeStore::row(FakeStore::day(1), Some(1.0)),
                FakeStore::row(FakeStore::day(20), Some(2.0)),
            ],
        );

        // One-month look-back from Feb 10 cuts off Jan 1 but keeps Jan 20.
        let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let points = fetch_window(&store, "unrate", 1, today).await;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 2.0);
    }

    #[tokio::test]
    async fn missing_table_degrades_to_empty() {
        let store = FakeStore::default();
        assert!(fetch_window(&store, "NOPE", 24, FakeStore::day(1)).await.is_empty());
        assert!(fetch_recent(&store, "NOPE", 3).await.is_empty());
    }

    #[tokio::test]
    async fn recent_is_most_recent_first() {
        let mut store = FakeStore::default();
        store.observations.insert(
            "dgs10".to_string(),
            vec![
                FakeStore::row(FakeStore::day(1), Some(1.0)),
                FakeStore::row(FakeStore::day(2), Some(2.0)),
                FakeStore::row(FakeStore::day(3), Some(3.0)),
                FakeStore::row(FakeStore::day(4), Some(4.0)),
            ],
        );

        let points = fetch_recent(&store, "DGS10", 3).await;
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, [4.0, 3.0, 2.0]);
    }
}

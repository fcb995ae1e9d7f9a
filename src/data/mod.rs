//! Store access and series selection.

pub mod catalog;
pub mod points;
pub mod sample;
pub mod store;

pub use catalog::{CatalogUnavailable, list_by_category};
pub use points::{fetch_recent, fetch_window};
pub use sample::{GRID_SERIES_TARGET, sample_evenly};
pub use store::{HttpStore, SeriesStore, StoreError};

#[cfg(test)]
pub(crate) mod testutil {
    //! Shared in-memory store double mirroring the documented store surface.

    use std::collections::HashMap;

    use chrono::NaiveDate;
    use reqwest::StatusCode;

    use crate::data::store::{RawObservation, RawValue, SeriesStore, StoreError};
    use crate::domain::SeriesMeta;

    #[derive(Default, Clone)]
    pub struct FakeStore {
        pub catalog: Vec<SeriesMeta>,
        /// Ascending-by-date raw rows, keyed by lower-cased series id.
        /// A missing key behaves like a missing table.
        pub observations: HashMap<String, Vec<RawObservation>>,
        pub fail_catalog: bool,
    }

    impl FakeStore {
        pub fn meta(id: &str, category: &str, popularity: i64) -> SeriesMeta {
            SeriesMeta {
                id: id.to_string(),
                title: format!("{id} title"),
                units: "Percent".to_string(),
                frequency: "Monthly".to_string(),
                category: category.to_string(),
                popularity,
                last_updated: None,
            }
        }

        pub fn day(n: u32) -> NaiveDate {
            NaiveDate::from_ymd_opt(2025, 1, n).unwrap()
        }

        pub fn row(date: NaiveDate, value: Option<f64>) -> RawObservation {
            RawObservation {
                date,
                value: value.map(RawValue::Number),
            }
        }

        fn series_rows(&self, series_id: &str) -> Result<&[RawObservation], StoreError> {
            match self.observations.get(&series_id.to_lowercase()) {
                Some(rows) => Ok(rows),
                None => Err(StoreError::Status(StatusCode::NOT_FOUND)),
            }
        }
    }

    impl SeriesStore for FakeStore {
        async fn tracked_series(&self, filter: &str) -> Result<Vec<SeriesMeta>, StoreError> {
            if self.fail_catalog {
                return Err(StoreError::Status(StatusCode::SERVICE_UNAVAILABLE));
            }
            let needle = filter.to_lowercase();
            let mut rows: Vec<SeriesMeta> = self
                .catalog
                .iter()
                .filter(|m| m.category.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.popularity.cmp(&a.popularity));
            Ok(rows)
        }

        async fn observations_since(
            &self,
            series_id: &str,
            cutoff: NaiveDate,
        ) -> Result<Vec<RawObservation>, StoreError> {
            Ok(self
                .series_rows(series_id)?
                .iter()
                .filter(|row| row.date >= cutoff)
                .cloned()
                .collect())
        }

        async fn recent_observations(
            &self,
            series_id: &str,
            limit: usize,
        ) -> Result<Vec<RawObservation>, StoreError> {
            let rows = self.series_rows(series_id)?;
            Ok(rows.iter().rev().take(limit).cloned().collect())
        }
    }
}

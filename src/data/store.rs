//! Read-only access to the external tabular store.
//!
//! The store speaks PostgREST-style HTTP: one `tracked_series` table for
//! catalog metadata plus one observation table per series, named after the
//! lower-cased series id. Everything here is read-only; ingestion happens in
//! a separate process.
//!
//! The query surface is a trait so the pipeline can be exercised against an
//! in-memory store in tests; `HttpStore` is the production implementation.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::SeriesMeta;

/// Errors from the store transport layer.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store responded with status {0}")]
    Status(StatusCode),
    #[error("missing store configuration: {0} is not set")]
    Config(&'static str),
}

/// An observation row as the store serves it.
///
/// `value` arrives as a JSON number, a string (the ingestion source uses "."
/// as its missing-value placeholder), or null. Normalization to `f64` is the
/// fetcher's job, so this type stays a faithful wire record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    #[serde(default)]
    pub value: Option<RawValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Read-only query surface the pipeline needs from the store.
#[allow(async_fn_in_trait)]
pub trait SeriesStore {
    /// Catalog rows whose category contains `filter` (case-insensitive),
    /// ordered by popularity descending. An empty filter matches everything.
    async fn tracked_series(&self, filter: &str) -> Result<Vec<SeriesMeta>, StoreError>;

    /// Raw observation rows for `series_id` with `date >= cutoff`,
    /// ascending by date.
    async fn observations_since(
        &self,
        series_id: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<RawObservation>, StoreError>;

    /// The most recent `limit` raw rows for `series_id`, descending by date.
    async fn recent_observations(
        &self,
        series_id: &str,
        limit: usize,
    ) -> Result<Vec<RawObservation>, StoreError>;
}

/// Observation table for a series id.
///
/// Ids are case-insensitive, so the table name is always derived from the
/// lower-cased id.
pub fn observation_table(series_id: &str) -> String {
    format!("series_{}", series_id.to_lowercase())
}

/// PostgREST HTTP client for the store.
#[derive(Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpStore {
    /// Build a client from `FREDTERM_STORE_URL` / `FREDTERM_STORE_KEY`
    /// (a `.env` file is honored if present).
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("FREDTERM_STORE_URL")
            .map_err(|_| StoreError::Config("FREDTERM_STORE_URL"))?;
        let api_key = std::env::var("FREDTERM_STORE_KEY")
            .map_err(|_| StoreError::Config("FREDTERM_STORE_KEY"))?;
        Ok(Self::new(base_url, api_key))
    }

    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status()));
        }

        Ok(resp.json().await?)
    }
}

impl SeriesStore for HttpStore {
    async fn tracked_series(&self, filter: &str) -> Result<Vec<SeriesMeta>, StoreError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "popularity.desc".to_string()),
        ];
        if !filter.is_empty() {
            query.push(("category", format!("ilike.*{filter}*")));
        }
        self.get_rows("tracked_series", &query).await
    }

    async fn observations_since(
        &self,
        series_id: &str,
        cutoff: NaiveDate,
    ) -> Result<Vec<RawObservation>, StoreError> {
        let query = [
            ("select", "date,value".to_string()),
            ("date", format!("gte.{cutoff}")),
            ("order", "date.asc".to_string()),
        ];
        self.get_rows(&observation_table(series_id), &query).await
    }

    async fn recent_observations(
        &self,
        series_id: &str,
        limit: usize,
    ) -> Result<Vec<RawObservation>, StoreError> {
        let query = [
            ("select", "date,value".to_string()),
            ("order", "date.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        self.get_rows(&observation_table(series_id), &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_table_lowercases_ids() {
        assert_eq!(observation_table("UNRATE"), "series_unrate");
        assert_eq!(observation_table("dgs10"), "series_dgs10");
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let store = HttpStore::new("https://store.example//", "key");
        assert_eq!(store.base_url, "https://store.example");
    }
}

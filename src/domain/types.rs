//! Shared domain types.
//!
//! These are immutable value records: every pipeline stage produces fresh
//! values and nothing is mutated after construction, so views can hold and
//! share them freely across refreshes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity record for one tracked indicator series.
///
/// Created and updated by an external ingestion process; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    /// Stable unique key, e.g. `UNRATE`. Lookups are case-insensitive and the
    /// per-series observation table name is derived from the lower-cased id.
    pub id: String,
    pub title: String,
    /// Free-text unit descriptor, e.g. "Percent" or "Billions of Dollars".
    pub units: String,
    /// Free-text cadence descriptor, e.g. "Weekly, Ending Friday".
    pub frequency: String,
    /// Coarse topical grouping used for filtering and balanced sampling.
    pub category: String,
    /// Ordering rank; higher means more prominent.
    pub popularity: i64,
    /// Ingestion timestamp, passed through for display only.
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// One (date, value) sample of a series.
///
/// Rows with a null or unparseable value at the source never become an
/// `Observation`; see `data::points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// A selectable look-back window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Short display label, e.g. "6M" or "10Y".
    pub label: &'static str,
    /// Look-back length in whole calendar months.
    pub months: u32,
}

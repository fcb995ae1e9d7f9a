//! Series catalog access: category filtering and prominence ordering.
//!
//! A failed catalog query is a distinguishable condition, not an empty
//! result: callers get `Err(CatalogUnavailable)` and can render a retry
//! state, while `Ok(vec![])` means the filter legitimately matched nothing.

use log::warn;

use crate::data::store::{SeriesStore, StoreError};
use crate::domain::SeriesMeta;

/// The catalog query itself failed; distinct from zero matches.
#[derive(thiserror::Error, Debug)]
#[error("series catalog unavailable: {0}")]
pub struct CatalogUnavailable(#[from] pub StoreError);

/// All catalog entries whose category contains `filter` (case-insensitive),
/// most popular first. An empty filter matches the whole catalog.
pub async fn list_by_category<S: SeriesStore>(
    store: &S,
    filter: &str,
) -> Result<Vec<SeriesMeta>, CatalogUnavailable> {
    let mut rows = match store.tracked_series(filter).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!("catalog query failed: {err}");
            return Err(CatalogUnavailable(err));
        }
    };

    // Stable sort: ties keep the store's row order.
    rows.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    Ok(rows)
}

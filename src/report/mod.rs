//! Presentation formatting: unit-aware values, date contracts, CLI tables.

pub mod format;
pub mod tables;

pub use format::{format_date_long, format_date_short, format_grid_value, format_value};
pub use tables::{dashboard_summary, format_catalog_table, format_grid_table, format_series_detail};

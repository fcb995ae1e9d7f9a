//! `fred-terminal` library crate.
//!
//! The binary (`fredterm`) is a thin wrapper around this library so that:
//!
//! - the selection/windowing/aggregation pipeline is testable without a
//!   terminal or a live store
//! - modules are reusable (e.g., future GUI/daemon front-ends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
pub mod tui;

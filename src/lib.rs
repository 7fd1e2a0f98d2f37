//! Contact analytics dashboard: load a contact sheet (remote values endpoint
//! or local CSV/JSON export), filter it per column, and view chart summaries,
//! headline metrics, a data table, and a CSV export of the filtered view.
//!
//! The pipeline is strictly one-directional and recomputed per interaction:
//! loader → [`data::model::RecordTable`] → [`data::filter`] → presentation.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

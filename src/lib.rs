//! Nobel Prize laureates per capita.
//!
//! Loads the Nobel laureate archive and a world population table, joins them
//! on birth country, and reports laureate counts and per-capita rates by
//! country and by prize category as console tables and charts.

pub mod analysis;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod ui;

//! Data layer for the bikeshare explorer.
//!
//! Loads city trip logs from CSV, filters them by month and weekday,
//! computes descriptive statistics and pages through raw rows.

pub mod filter;
pub mod paginator;
pub mod reader;
pub mod statistics;

pub use bikeshare_core as core;

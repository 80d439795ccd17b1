//! Shared foundation for the bikeshare explorer.
//!
//! Holds the error type, the trip data model and filter selectors, the city
//! catalog, text formatting helpers and the command-line settings.

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ExplorerError, Result};

//! Presentation layer for the bikeshare explorer.
//!
//! Turns statistics reports and raw trip rows into terminal text and owns
//! the prompt wording shown by the session.

pub mod messages;
pub mod raw_table;
pub mod report;
pub mod screen;

pub use bikeshare_core as core;

//! Interactive session driving the bikeshare explorer.
//!
//! [`prompt`] owns line input and the escape sentinel; [`session`] runs the
//! filter, load and menu cycle on top of it.

pub mod prompt;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
pub use bikeshare_ui as ui;

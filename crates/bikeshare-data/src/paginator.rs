//! Fixed-size windows over the working dataset for raw-row browsing.
//!
//! The cursor is owned by the caller; [`view`] never resets it.

use bikeshare_core::models::TripRecord;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Result of asking for the page at a cursor.
#[derive(Debug, PartialEq)]
pub enum Page<'a> {
    /// Up to [`PAGE_SIZE`] rows and the cursor of the following page.
    Rows {
        rows: &'a [TripRecord],
        next_cursor: usize,
    },
    /// The cursor is at or past the end of the data.
    NoMoreData,
}

/// The page of `records` starting at `cursor`.
pub fn view(records: &[TripRecord], cursor: usize) -> Page<'_> {
    if cursor >= records.len() {
        return Page::NoMoreData;
    }
    let end = (cursor + PAGE_SIZE).min(records.len());
    Page::Rows {
        rows: &records[cursor..end],
        next_cursor: cursor + PAGE_SIZE,
    }
}

/// `true` when a page starting at `cursor` would hold rows.
pub fn has_more(records: &[TripRecord], cursor: usize) -> bool {
    cursor < records.len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

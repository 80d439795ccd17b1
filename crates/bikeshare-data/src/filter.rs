//! Month and weekday filtering of loaded trip tables.

use bikeshare_core::models::{Month, Selector, TripRecord, TripTable};
use chrono::Weekday;
use tracing::debug;

/// Keep the trips whose month is any selected month and whose weekday is any
/// selected weekday.
///
/// Output rows are grouped by selected month (in selection order), then
/// regrouped by selected weekday; within a group the input order is kept.
/// The result keeps the input table's columns. An empty result is valid.
pub fn apply_filters(
    table: &TripTable,
    months: &Selector<Month>,
    weekdays: &Selector<Weekday>,
) -> TripTable {
    let by_month: Vec<&TripRecord> = months
        .values()
        .iter()
        .flat_map(|month| {
            table
                .records()
                .iter()
                .filter(move |trip| trip.month == month.number())
        })
        .collect();

    let filtered: Vec<TripRecord> = weekdays
        .values()
        .iter()
        .flat_map(|day| {
            by_month
                .iter()
                .filter(move |trip| trip.weekday == *day)
                .map(|trip| (*trip).clone())
        })
        .collect();

    debug!(
        "Filtered {} trips down to {} (months: {:?}, weekdays: {:?})",
        table.len(),
        filtered.len(),
        months.values(),
        weekdays.values()
    );

    table.with_records(filtered)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Aligned plain-text table of raw trip rows.

use bikeshare_core::models::{weekday_display_name, Field, TripRecord, TripTable};
use unicode_width::UnicodeWidthStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column headers for `table`; optional columns appear only when present.
fn headers(table: &TripTable) -> Vec<&'static str> {
    let mut headers = vec![
        "",
        Field::StartTime.header(),
        Field::EndTime.header(),
        Field::TripDuration.header(),
        Field::StartStation.header(),
        Field::EndStation.header(),
        Field::UserType.header(),
    ];
    for field in Field::OPTIONAL {
        if table.has_field(field) {
            headers.push(field.header());
        }
    }
    headers.extend(["Month", "Weekday", "Start Hour"]);
    headers
}

fn cells(table: &TripTable, trip: &TripRecord) -> Vec<String> {
    let missing = || "-".to_string();
    let mut cells = vec![
        format!("{}#{}", trip.city, trip.row),
        trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
        trip.end_time.format(TIMESTAMP_FORMAT).to_string(),
        trip.trip_duration.to_string(),
        trip.start_station.clone(),
        trip.end_station.clone(),
        trip.user_type.clone().unwrap_or_else(missing),
    ];
    if table.has_field(Field::Gender) {
        cells.push(trip.gender.clone().unwrap_or_else(missing));
    }
    if table.has_field(Field::BirthYear) {
        cells.push(
            trip.birth_year
                .map(|y| y.to_string())
                .unwrap_or_else(missing),
        );
    }
    cells.push(trip.month.to_string());
    cells.push(weekday_display_name(trip.weekday).to_string());
    cells.push(trip.start_hour.to_string());
    cells
}

/// Render `rows` (a page of `table`) as a header line plus one line per row.
pub fn render_rows(table: &TripTable, rows: &[TripRecord]) -> String {
    let header: Vec<String> = headers(table).into_iter().map(String::from).collect();
    let body: Vec<Vec<String>> = rows.iter().map(|trip| cells(table, trip)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for line in std::iter::once(&header).chain(body.iter()) {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width - cell.width())))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

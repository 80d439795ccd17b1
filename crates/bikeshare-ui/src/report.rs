//! Text rendering of the statistics reports.

use bikeshare_core::formatting::{format_count, format_elapsed, percentage};
use bikeshare_core::models::{month_display_name, weekday_display_name};
use bikeshare_data::statistics::{
    BirthYearStats, Distribution, DurationStats, FieldReport, StationStats, TimeStats, Timed,
    UserStats,
};
use unicode_width::UnicodeWidthStr;

/// Horizontal rule printed after every section.
pub const SEPARATOR: &str = "----------------------------------------";

const NO_TRIPS: &str = "No trips match the selected filters.";

pub fn render_time_stats(timed: &Timed<Option<TimeStats>>) -> String {
    let mut out = String::from("\nCalculating travel time statistics...\n\n");
    match &timed.report {
        Some(stats) => {
            out.push_str(&format!(
                "Most common month for travel: {}.\n",
                month_display_name(stats.most_common_month)
            ));
            out.push_str(&format!(
                "Most common day of the week: {}.\n",
                weekday_display_name(stats.most_common_weekday)
            ));
            out.push_str(&format!(
                "Most common start hour: {}.\n",
                stats.most_common_hour
            ));
        }
        None => push_line(&mut out, NO_TRIPS),
    }
    push_footer(&mut out, timed);
    out
}

pub fn render_station_stats(timed: &Timed<Option<StationStats>>) -> String {
    let mut out = String::from("\nCalculating popular stations and trips...\n\n");
    match &timed.report {
        Some(stats) => {
            out.push_str(&format!(
                "Most common start station: {}\n",
                stats.most_common_start
            ));
            out.push_str(&format!("Most common end station: {}\n", stats.most_common_end));
            out.push_str(&format!(
                "Most common start-end station combination: {}\n",
                stats.most_common_route
            ));
        }
        None => push_line(&mut out, NO_TRIPS),
    }
    push_footer(&mut out, timed);
    out
}

pub fn render_duration_stats(timed: &Timed<Option<DurationStats>>) -> String {
    let mut out = String::from("\nCalculating trip duration statistics...\n\n");
    match &timed.report {
        Some(stats) => {
            out.push_str(&format!("Total travel time: {}.\n", stats.total_display()));
            out.push_str(&format!("Average travel time: {}.\n", stats.mean_display()));
        }
        None => push_line(&mut out, NO_TRIPS),
    }
    push_footer(&mut out, timed);
    out
}

pub fn render_user_stats(timed: &Timed<UserStats>) -> String {
    let stats = &timed.report;
    let mut out = String::from("\nCalculating user statistics...\n\n");

    out.push_str("User type distribution:\n");
    push_distribution(&mut out, &stats.user_types);

    match &stats.gender {
        FieldReport::Available(dist) => {
            out.push_str("\nGender distribution:\n");
            push_distribution(&mut out, dist);
        }
        FieldReport::Unavailable { city } => {
            out.push_str(&format!("\nNo gender data available for {}.\n", city));
        }
    }

    match &stats.birth_years {
        FieldReport::Available(BirthYearStats {
            earliest,
            latest,
            most_common,
        }) => {
            out.push_str(&format!("\nOldest rider was born in: {}\n", earliest));
            out.push_str(&format!("Youngest rider was born in: {}\n", latest));
            out.push_str(&format!("Most common birth year: {}\n", most_common));
        }
        FieldReport::Unavailable { city } => {
            out.push_str(&format!("\nNo birth year data available for {}.\n", city));
        }
    }

    push_footer(&mut out, timed);
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_footer<T>(out: &mut String, timed: &Timed<T>) {
    out.push_str(&format!(
        "\nThis took {} seconds.\n",
        format_elapsed(timed.elapsed)
    ));
    push_line(out, SEPARATOR);
}

/// One aligned line per value: label, count and share of rows with a value.
fn push_distribution(out: &mut String, dist: &Distribution) {
    if dist.is_empty() {
        push_line(out, "  (no values)");
        return;
    }
    let label_width = dist
        .entries
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    let counts: Vec<String> = dist.entries.iter().map(|(_, c)| format_count(*c)).collect();
    let count_width = counts.iter().map(|c| c.len()).max().unwrap_or(0);

    for ((label, count), count_str) in dist.entries.iter().zip(&counts) {
        let pad = label_width - label.width();
        out.push_str(&format!(
            "  {}{}  {:>cw$} ({:.1}%)\n",
            label,
            " ".repeat(pad),
            count_str,
            percentage(*count as f64, dist.total as f64, 1),
            cw = count_width
        ));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

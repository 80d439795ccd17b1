use std::time::Duration;

/// Thousands-grouped integer count.
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(12_345), "12,345");
/// ```
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Format a whole number of seconds as days, hours, minutes and seconds.
///
/// ```
/// use bikeshare_core::formatting::format_total_duration;
///
/// assert_eq!(format_total_duration(90_061), "1d 1h 1m 1s");
/// assert_eq!(format_total_duration(59), "0d 0h 0m 59s");
/// ```
pub fn format_total_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = total_seconds % 86_400 / 3_600;
    let minutes = total_seconds % 3_600 / 60;
    let seconds = total_seconds % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

/// Format a mean duration in seconds as whole minutes plus the real-valued
/// remainder in seconds. The remainder is not rounded.
///
/// ```
/// use bikeshare_core::formatting::format_mean_duration;
///
/// assert_eq!(format_mean_duration(125.5), "2m 5.5s");
/// assert_eq!(format_mean_duration(120.0), "2m 0s");
/// ```
pub fn format_mean_duration(mean_seconds: f64) -> String {
    let minutes = (mean_seconds / 60.0).floor();
    let seconds = mean_seconds - minutes * 60.0;
    format!("{}m {}s", minutes as u64, seconds)
}

/// Wall-clock time as fractional seconds, e.g. `"0.0042"`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.4}", elapsed.as_secs_f64())
}

/// Upper-case the first letter of every space-separated word.
///
/// ```
/// use bikeshare_core::formatting::title_case;
///
/// assert_eq!(title_case("new york city"), "New York City");
/// ```
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Descriptive statistics over a filtered trip table.
//!
//! Each `*_stats` function is pure and returns a small report struct;
//! rendering lives in the UI crate. Every "most common" value uses the same
//! rule: highest count wins, and among equal counts the value that appears
//! first in row order wins.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use bikeshare_core::formatting::{format_mean_duration, format_total_duration};
use bikeshare_core::models::{Field, TripTable};
use chrono::Weekday;

// ── Timing ────────────────────────────────────────────────────────────────────

/// A report together with the wall-clock time it took to compute.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub report: T,
    pub elapsed: Duration,
}

/// Run `f` and record how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let report = f();
    Timed {
        report,
        elapsed: start.elapsed(),
    }
}

// ── Frequency helpers ─────────────────────────────────────────────────────────

/// Count each distinct value.
///
/// Sorted by descending count; equal counts keep first-occurrence order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    // value -> (count, index of first occurrence)
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        counts.entry(value).or_insert((0, idx)).0 += 1;
    }

    let mut ordered: Vec<(T, usize, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ordered
        .into_iter()
        .map(|(value, count, _)| (value, count))
        .collect()
}

/// Most frequent value, or `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}

/// Counts of each distinct value among the rows that have one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    pub entries: Vec<(String, usize)>,
    /// Number of rows with a value.
    pub total: usize,
}

impl Distribution {
    fn from_values<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let entries = value_counts(values)
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect::<Vec<_>>();
        let total = entries.iter().map(|(_, count)| count).sum();
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome for a statistic that depends on an optional column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldReport<T> {
    Available(T),
    /// The column (or any value in it) is absent for the selected city.
    Unavailable { city: String },
}

fn unavailable<T>(city: &str) -> FieldReport<T> {
    FieldReport::Unavailable {
        city: city.to_string(),
    }
}

// ── Time statistics ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Calendar month number of the busiest month.
    pub most_common_month: u32,
    pub most_common_weekday: Weekday,
    pub most_common_hour: u32,
}

/// Busiest month, weekday and start hour. `None` for an empty table.
pub fn time_stats(table: &TripTable) -> Option<TimeStats> {
    let trips = table.records();
    Some(TimeStats {
        most_common_month: mode(trips.iter().map(|t| t.month))?,
        most_common_weekday: mode(trips.iter().map(|t| t.weekday))?,
        most_common_hour: mode(trips.iter().map(|t| t.start_hour))?,
    })
}

// ── Station statistics ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub most_common_start: String,
    pub most_common_end: String,
    /// Most frequent `"<start> - <end>"` combination.
    pub most_common_route: String,
}

/// Most popular start station, end station and route. `None` for an empty table.
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let trips = table.records();
    Some(StationStats {
        most_common_start: mode(trips.iter().map(|t| t.start_station.as_str()))?.to_string(),
        most_common_end: mode(trips.iter().map(|t| t.end_station.as_str()))?.to_string(),
        most_common_route: mode(trips.iter().map(|t| t.route()))?,
    })
}

// ── Trip-duration statistics ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_seconds: u64,
    pub mean_seconds: f64,
}

impl DurationStats {
    /// Total as `"{d}d {h}h {m}m {s}s"`.
    pub fn total_display(&self) -> String {
        format_total_duration(self.total_seconds)
    }

    /// Mean as `"{m}m {s}s"` with fractional seconds.
    pub fn mean_display(&self) -> String {
        format_mean_duration(self.mean_seconds)
    }
}

/// Total and mean trip duration. `None` for an empty table.
pub fn duration_stats(table: &TripTable) -> Option<DurationStats> {
    if table.is_empty() {
        return None;
    }
    let total_seconds: u64 = table.records().iter().map(|t| t.trip_duration).sum();
    Some(DurationStats {
        total_seconds,
        mean_seconds: total_seconds as f64 / table.len() as f64,
    })
}

// ── User statistics ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Distribution,
    pub gender: FieldReport<Distribution>,
    pub birth_years: FieldReport<BirthYearStats>,
}

/// Rider demographics. Missing optional columns are reported as
/// [`FieldReport::Unavailable`] naming `city_label`.
pub fn user_stats(table: &TripTable, city_label: &str) -> UserStats {
    let trips = table.records();

    let user_types = Distribution::from_values(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let gender = if table.has_field(Field::Gender) {
        FieldReport::Available(Distribution::from_values(
            trips.iter().filter_map(|t| t.gender.as_deref()),
        ))
    } else {
        unavailable(city_label)
    };

    let birth_years = if table.has_field(Field::BirthYear) {
        let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
        match (
            years.iter().min(),
            years.iter().max(),
            mode(years.iter().copied()),
        ) {
            (Some(&earliest), Some(&latest), Some(most_common)) => {
                FieldReport::Available(BirthYearStats {
                    earliest,
                    latest,
                    most_common,
                })
            }
            _ => unavailable(city_label),
        }
    } else {
        unavailable(city_label)
    };

    UserStats {
        user_types,
        gender,
        birth_years,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{RawTrip, TripRecord};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::BTreeSet;

    fn ts(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn trip(start: NaiveDateTime, from: &str, to: &str, secs: u64) -> RawTrip {
        RawTrip {
            city: "chicago".to_string(),
            row: 0,
            start_time: start,
            end_time: start,
            start_station: from.to_string(),
            end_station: to.to_string(),
            trip_duration: secs,
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    fn table(raws: Vec<RawTrip>, fields: &[Field]) -> TripTable {
        TripTable::new(
            raws.into_iter().map(TripRecord::new).collect(),
            fields.iter().copied().collect::<BTreeSet<_>>(),
        )
    }

    // ── value_counts / mode ───────────────────────────────────────────────────

    #[test]
    fn test_value_counts_sorted_by_count() {
        let counts = value_counts(vec!["b", "a", "b", "c", "b", "a"]);
        assert_eq!(counts, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_mode_tie_breaks_on_first_occurrence() {
        assert_eq!(mode(vec![3, 1, 1, 3]), Some(3));
        assert_eq!(mode(vec!["y", "x"]), Some("y"));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    // ── time_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_time_stats() {
        let t = table(
            vec![
                trip(ts(3, 6, 8), "A", "B", 60), // Mon
                trip(ts(3, 7, 8), "A", "B", 60), // Tue
                trip(ts(1, 2, 17), "A", "B", 60), // Mon
            ],
            &[],
        );
        let stats = time_stats(&t).unwrap();
        assert_eq!(stats.most_common_month, 3);
        assert_eq!(stats.most_common_weekday, Weekday::Mon);
        assert_eq!(stats.most_common_hour, 8);
    }

    #[test]
    fn test_time_stats_empty() {
        assert!(time_stats(&TripTable::default()).is_none());
    }

    // ── station_stats ─────────────────────────────────────────────────────────

    #[test]
    fn test_station_stats() {
        let t = table(
            vec![
                trip(ts(1, 2, 8), "Canal St", "Clark St", 60),
                trip(ts(1, 2, 9), "Canal St", "State St", 60),
                trip(ts(1, 2, 10), "Lake Shore", "State St", 60),
                trip(ts(1, 2, 11), "Lake Shore", "State St", 60),
            ],
            &[],
        );
        let stats = station_stats(&t).unwrap();
        // Canal St and Lake Shore tie at 2; Canal St appears first.
        assert_eq!(stats.most_common_start, "Canal St");
        assert_eq!(stats.most_common_end, "State St");
        assert_eq!(stats.most_common_route, "Lake Shore - State St");
    }

    // ── duration_stats ────────────────────────────────────────────────────────

    #[test]
    fn test_duration_stats() {
        let t = table(
            vec![
                trip(ts(1, 2, 8), "A", "B", 90_000),
                trip(ts(1, 2, 9), "A", "B", 61),
            ],
            &[],
        );
        let stats = duration_stats(&t).unwrap();
        assert_eq!(stats.total_seconds, 90_061);
        assert_eq!(stats.total_display(), "1d 1h 1m 1s");
        assert!((stats.mean_seconds - 45_030.5).abs() < 1e-9);
        assert_eq!(stats.mean_display(), "750m 30.5s");
    }

    #[test]
    fn test_duration_mean_keeps_fraction() {
        let t = table(
            vec![
                trip(ts(1, 2, 8), "A", "B", 125),
                trip(ts(1, 2, 9), "A", "B", 126),
            ],
            &[],
        );
        assert_eq!(duration_stats(&t).unwrap().mean_display(), "2m 5.5s");
    }

    #[test]
    fn test_duration_stats_empty() {
        assert!(duration_stats(&TripTable::default()).is_none());
    }

    // ── user_stats ────────────────────────────────────────────────────────────

    #[test]
    fn test_user_stats_full_schema() {
        let mut a = trip(ts(1, 2, 8), "A", "B", 60);
        a.gender = Some("Male".to_string());
        a.birth_year = Some(1985);
        let mut b = trip(ts(1, 2, 9), "A", "B", 60);
        b.gender = Some("Female".to_string());
        b.birth_year = Some(1990);
        b.user_type = Some("Customer".to_string());
        let mut c = trip(ts(1, 2, 10), "A", "B", 60);
        c.gender = Some("Male".to_string());
        c.birth_year = Some(1990);
        let mut d = trip(ts(1, 2, 11), "A", "B", 60);
        d.user_type = None;

        let stats = user_stats(
            &table(vec![a, b, c, d], &[Field::Gender, Field::BirthYear]),
            "Chicago",
        );

        assert_eq!(
            stats.user_types.entries,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(stats.user_types.total, 3);
        match stats.gender {
            FieldReport::Available(dist) => {
                assert_eq!(
                    dist.entries,
                    vec![("Male".to_string(), 2), ("Female".to_string(), 1)]
                );
            }
            other => panic!("expected gender data, got {other:?}"),
        }
        assert_eq!(
            stats.birth_years,
            FieldReport::Available(BirthYearStats {
                earliest: 1985,
                latest: 1990,
                most_common: 1990,
            })
        );
    }

    #[test]
    fn test_user_stats_without_gender_column() {
        let stats = user_stats(&table(vec![trip(ts(1, 2, 8), "A", "B", 60)], &[]), "Washington");
        assert_eq!(
            stats.gender,
            FieldReport::Unavailable {
                city: "Washington".to_string()
            }
        );
        assert_eq!(
            stats.birth_years,
            FieldReport::Unavailable {
                city: "Washington".to_string()
            }
        );
        assert_eq!(stats.user_types.total, 1);
    }

    #[test]
    fn test_user_stats_birth_year_column_without_values() {
        let stats = user_stats(
            &table(vec![trip(ts(1, 2, 8), "A", "B", 60)], &[Field::BirthYear]),
            "Chicago",
        );
        assert!(matches!(stats.birth_years, FieldReport::Unavailable { .. }));
        assert!(matches!(stats.gender, FieldReport::Unavailable { .. }));
    }

    #[test]
    fn test_user_stats_empty_table() {
        let empty = TripTable::new(Vec::new(), BTreeSet::from([Field::Gender]));
        let stats = user_stats(&empty, "Chicago");
        assert!(stats.user_types.is_empty());
        match stats.gender {
            FieldReport::Available(dist) => assert!(dist.is_empty()),
            other => panic!("expected empty gender data, got {other:?}"),
        }
    }

    // ── timed ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_timed_returns_report() {
        let result = timed(|| 41 + 1);
        assert_eq!(result.report, 42);
    }
}

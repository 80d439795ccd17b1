use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::formatting::title_case;

// ── Month ─────────────────────────────────────────────────────────────────────

/// Months that can be used as a filter, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
}

/// Lower-case month names accepted at the month prompt.
pub const MONTH_NAMES: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// Calendar month number (January = 1).
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Lower-case canonical name.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self as usize - 1]
    }

    /// Look up a month by its lower-case canonical name.
    pub fn from_name(name: &str) -> Option<Month> {
        MONTH_NAMES
            .iter()
            .position(|m| *m == name)
            .map(|idx| Month::ALL[idx])
    }
}

/// Full English name for any calendar month number, e.g. `7` → `"July"`.
///
/// Falls back to the number itself when it is outside `1..=12`.
pub fn month_display_name(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| chrono::Month::try_from(n).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| number.to_string())
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Lower-case weekday names accepted at the weekday prompt, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Weekdays in the same order as [`WEEKDAY_NAMES`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Look up a weekday by its lower-case canonical name.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .position(|d| *d == name)
        .map(|idx| WEEKDAYS[idx])
}

/// Title-cased full name, e.g. `Weekday::Mon` → `"Monday"`.
pub fn weekday_display_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

/// A filter value chosen by the user: either one value or a set of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    OneOf(T),
    ManyOf(Vec<T>),
}

impl<T> Selector<T> {
    /// All selected values in the order they were entered.
    pub fn values(&self) -> &[T] {
        match self {
            Selector::OneOf(value) => std::slice::from_ref(value),
            Selector::ManyOf(values) => values,
        }
    }

    /// Convert every value, keeping the one/many shape.
    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<Selector<U>, E> {
        Ok(match self {
            Selector::OneOf(value) => Selector::OneOf(f(value)?),
            Selector::ManyOf(values) => {
                Selector::ManyOf(values.iter().map(f).collect::<Result<Vec<_>, E>>()?)
            }
        })
    }

    /// Join the values' display forms with `", "`.
    pub fn label(&self, f: impl Fn(&T) -> String) -> String {
        self.values().iter().map(f).collect::<Vec<_>>().join(", ")
    }
}

impl<T: PartialEq> Selector<T> {
    /// Build a multi-value selector, dropping repeated values.
    pub fn many(values: impl IntoIterator<Item = T>) -> Self {
        let mut unique: Vec<T> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Selector::ManyOf(unique)
    }

    /// `true` when `value` is one of the selected values.
    pub fn contains(&self, value: &T) -> bool {
        self.values().contains(value)
    }
}

/// The complete set of filters confirmed by the user for one load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub cities: Selector<String>,
    pub months: Selector<Month>,
    pub weekdays: Selector<Weekday>,
}

impl FilterSelection {
    /// Title-cased city names, e.g. `"Chicago, New York City"`.
    pub fn city_label(&self) -> String {
        self.cities.label(|c| title_case(c))
    }

    pub fn month_label(&self) -> String {
        self.months.label(|m| title_case(m.name()))
    }

    pub fn weekday_label(&self) -> String {
        self.weekdays
            .label(|d| weekday_display_name(*d).to_string())
    }
}

// ── Trip records ──────────────────────────────────────────────────────────────

/// A column of a trip log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    StartTime,
    EndTime,
    StartStation,
    EndStation,
    TripDuration,
    UserType,
    Gender,
    BirthYear,
}

impl Field {
    /// Columns every source must carry.
    pub const REQUIRED: [Field; 6] = [
        Field::StartTime,
        Field::EndTime,
        Field::StartStation,
        Field::EndStation,
        Field::TripDuration,
        Field::UserType,
    ];

    /// Columns whose presence varies by source.
    pub const OPTIONAL: [Field; 2] = [Field::Gender, Field::BirthYear];

    /// Header text used in the CSV sources.
    pub fn header(self) -> &'static str {
        match self {
            Field::StartTime => "Start Time",
            Field::EndTime => "End Time",
            Field::StartStation => "Start Station",
            Field::EndStation => "End Station",
            Field::TripDuration => "Trip Duration",
            Field::UserType => "User Type",
            Field::Gender => "Gender",
            Field::BirthYear => "Birth Year",
        }
    }

    pub fn is_optional(self) -> bool {
        Self::OPTIONAL.contains(&self)
    }
}

/// Source attributes of one trip, as read from a trip log.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTrip {
    pub city: String,
    pub row: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    pub trip_duration: u64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

/// One trip with its derived calendar fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// City the record was loaded from.
    pub city: String,
    /// 0-based position within the source file.
    pub row: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Duration in whole seconds.
    pub trip_duration: u64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Calendar month of `start_time` (January = 1).
    pub month: u32,
    /// Weekday of `start_time`.
    pub weekday: Weekday,
    /// Hour of day of `start_time` (0-23).
    pub start_hour: u32,
}

impl TripRecord {
    pub fn new(raw: RawTrip) -> Self {
        let month = raw.start_time.month();
        let weekday = raw.start_time.weekday();
        let start_hour = raw.start_time.hour();
        Self {
            city: raw.city,
            row: raw.row,
            start_time: raw.start_time,
            end_time: raw.end_time,
            start_station: raw.start_station,
            end_station: raw.end_station,
            trip_duration: raw.trip_duration,
            user_type: raw.user_type,
            gender: raw.gender,
            birth_year: raw.birth_year,
            month,
            weekday,
            start_hour,
        }
    }

    /// Start and end station joined as `"<start> - <end>"`.
    pub fn route(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

// ── TripTable ─────────────────────────────────────────────────────────────────

/// An ordered collection of trips plus the optional columns its sources had.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    records: Vec<TripRecord>,
    optional_fields: BTreeSet<Field>,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, optional_fields: BTreeSet<Field>) -> Self {
        Self {
            records,
            optional_fields,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the column exists in this table. Required columns always do.
    pub fn has_field(&self, field: Field) -> bool {
        !field.is_optional() || self.optional_fields.contains(&field)
    }

    /// A table with the same columns as `self` holding `records`.
    pub fn with_records(&self, records: Vec<TripRecord>) -> Self {
        Self {
            records,
            optional_fields: self.optional_fields.clone(),
        }
    }

    /// Concatenate `other` onto `self`; the result has the union of columns.
    pub fn append(&mut self, other: TripTable) {
        self.records.extend(other.records);
        self.optional_fields.extend(other.optional_fields);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    fn raw(start: NaiveDateTime) -> RawTrip {
        RawTrip {
            city: "chicago".to_string(),
            row: 0,
            start_time: start,
            end_time: start,
            start_station: "Canal St".to_string(),
            end_station: "Clark St".to_string(),
            trip_duration: 300,
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    // ── Month / weekday lookups ───────────────────────────────────────────────

    #[test]
    fn test_month_number_is_position_plus_one() {
        for (idx, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.number(), idx as u32 + 1);
            assert_eq!(Month::from_name(month.name()), Some(*month));
        }
    }

    #[test]
    fn test_month_from_unknown_name() {
        assert_eq!(Month::from_name("july"), None);
        assert_eq!(Month::from_name("January"), None);
    }

    #[test]
    fn test_month_display_name() {
        assert_eq!(month_display_name(1), "January");
        assert_eq!(month_display_name(7), "July");
        assert_eq!(month_display_name(13), "13");
    }

    #[test]
    fn test_weekday_lookup() {
        assert_eq!(weekday_from_name("sunday"), Some(Weekday::Sun));
        assert_eq!(weekday_from_name("saturday"), Some(Weekday::Sat));
        assert_eq!(weekday_from_name("funday"), None);
        assert_eq!(weekday_display_name(Weekday::Wed), "Wednesday");
    }

    // ── Selector ──────────────────────────────────────────────────────────────

    #[test]
    fn test_selector_values() {
        assert_eq!(Selector::OneOf(3).values().to_vec(), vec![3]);
        assert_eq!(Selector::ManyOf(vec![1, 2]).values().to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_selector_many_drops_duplicates() {
        let sel = Selector::many(vec!["a", "b", "a"]);
        assert_eq!(sel, Selector::ManyOf(vec!["a", "b"]));
    }

    #[test]
    fn test_selector_try_map_keeps_shape() {
        let sel = Selector::ManyOf(vec!["january".to_string(), "march".to_string()]);
        let months = sel
            .try_map(|name| Month::from_name(name).ok_or(()))
            .unwrap();
        assert_eq!(months, Selector::ManyOf(vec![Month::January, Month::March]));

        let bad = Selector::OneOf("july".to_string());
        assert!(bad.try_map(|name| Month::from_name(name).ok_or(())).is_err());
    }

    #[test]
    fn test_filter_selection_labels() {
        let selection = FilterSelection {
            cities: Selector::ManyOf(vec!["chicago".to_string(), "new york city".to_string()]),
            months: Selector::OneOf(Month::March),
            weekdays: Selector::ManyOf(vec![Weekday::Mon, Weekday::Fri]),
        };
        assert_eq!(selection.city_label(), "Chicago, New York City");
        assert_eq!(selection.month_label(), "March");
        assert_eq!(selection.weekday_label(), "Monday, Friday");
    }

    // ── TripRecord ────────────────────────────────────────────────────────────

    #[test]
    fn test_trip_record_derives_calendar_fields() {
        // 2017-01-02 was a Monday.
        let record = TripRecord::new(raw(ts(2017, 1, 2, 9)));
        assert_eq!(record.month, 1);
        assert_eq!(record.weekday, Weekday::Mon);
        assert_eq!(record.start_hour, 9);
    }

    #[test]
    fn test_trip_record_route() {
        let record = TripRecord::new(raw(ts(2017, 1, 2, 9)));
        assert_eq!(record.route(), "Canal St - Clark St");
    }

    // ── TripTable ─────────────────────────────────────────────────────────────

    #[test]
    fn test_has_field_required_always_true() {
        let table = TripTable::default();
        assert!(table.has_field(Field::StartStation));
        assert!(!table.has_field(Field::Gender));
        assert!(!table.has_field(Field::BirthYear));
    }

    #[test]
    fn test_append_unions_optional_fields() {
        let mut with_gender = TripTable::new(
            vec![TripRecord::new(raw(ts(2017, 1, 2, 9)))],
            BTreeSet::from([Field::Gender]),
        );
        let without = TripTable::new(
            vec![TripRecord::new(raw(ts(2017, 2, 3, 10)))],
            BTreeSet::new(),
        );
        with_gender.append(without);
        assert_eq!(with_gender.len(), 2);
        assert!(with_gender.has_field(Field::Gender));
        assert!(!with_gender.has_field(Field::BirthYear));
    }

    #[test]
    fn test_with_records_keeps_fields() {
        let table = TripTable::new(Vec::new(), BTreeSet::from([Field::BirthYear]));
        let copy = table.with_records(vec![TripRecord::new(raw(ts(2017, 1, 2, 9)))]);
        assert!(copy.has_field(Field::BirthYear));
        assert_eq!(copy.len(), 1);
    }
}

//! CSV trip-log loading for the bikeshare explorer.
//!
//! Reads a city's source file into a [`TripTable`], deriving the calendar
//! fields of every row once at load time.

use std::collections::BTreeSet;
use std::path::Path;

use bikeshare_core::catalog::CityCatalog;
use bikeshare_core::error::{ExplorerError, Result};
use bikeshare_core::models::{Field, RawTrip, Selector, TripRecord, TripTable};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, warn};

/// Timestamp layouts accepted in the `Start Time` and `End Time` columns.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Header spelling some sources use for the user-type column.
const USER_TYPE_ALIAS: &str = "UserType";

// ── Row schema ────────────────────────────────────────────────────────────────

/// One CSV row as written in the source; unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "User Type", alias = "UserType", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── RecordStore ───────────────────────────────────────────────────────────────

/// Loads trip tables for the cities listed in a [`CityCatalog`].
///
/// Every call reads from disk; nothing is cached between loads.
#[derive(Debug, Clone)]
pub struct RecordStore {
    catalog: CityCatalog,
}

impl RecordStore {
    pub fn new(catalog: CityCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Load every trip of one city.
    pub fn load(&self, city: &str) -> Result<TripTable> {
        let path = self.catalog.resolve(city)?;
        read_trip_csv(city, path)
    }

    /// Load and concatenate the selected cities in selection order.
    ///
    /// Fails on the first city that cannot be loaded; no partial table is
    /// returned.
    pub fn load_many(&self, cities: &Selector<String>) -> Result<TripTable> {
        let mut table = TripTable::default();
        for city in cities.values() {
            table.append(self.load(city)?);
        }
        debug!("Loaded {} trips from {} cities", table.len(), cities.values().len());
        Ok(table)
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a trip-log CSV file for `city`.
///
/// Rows with an unparseable timestamp or duration are skipped and counted in
/// a warning; a missing required column fails the whole file.
pub fn read_trip_csv(city: &str, path: &Path) -> Result<TripTable> {
    let file = std::fs::File::open(path).map_err(|source| ExplorerError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| ExplorerError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let optional_fields = check_headers(&headers, path)?;

    let mut records = Vec::new();
    let mut skipped = 0u64;

    for (row, result) in reader.deserialize::<CsvTrip>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) if e.is_io_error() => {
                return Err(ExplorerError::Csv {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                debug!("Skipping row {} of {}: {}", row, path.display(), e);
                skipped += 1;
                continue;
            }
        };

        match to_record(city, row, raw) {
            Some(record) => records.push(record),
            None => {
                debug!("Skipping row {} of {}: invalid timestamp or duration", row, path.display());
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed rows in {}", skipped, path.display());
    }
    debug!(
        "File {}: {} trips loaded, {} skipped",
        path.display(),
        records.len(),
        skipped
    );

    Ok(TripTable::new(records, optional_fields))
}

/// Verify the required columns exist and report which optional ones do.
fn check_headers(headers: &csv::StringRecord, path: &Path) -> Result<BTreeSet<Field>> {
    let has = |name: &str| headers.iter().any(|h| h == name);

    for field in Field::REQUIRED {
        let present = match field {
            Field::UserType => has(field.header()) || has(USER_TYPE_ALIAS),
            _ => has(field.header()),
        };
        if !present {
            return Err(ExplorerError::MissingColumn {
                path: path.to_path_buf(),
                column: field.header().to_string(),
            });
        }
    }

    Ok(Field::OPTIONAL
        .into_iter()
        .filter(|field| has(field.header()))
        .collect())
}

fn to_record(city: &str, row: usize, raw: CsvTrip) -> Option<TripRecord> {
    let start_time = parse_timestamp(&raw.start_time)?;
    let end_time = parse_timestamp(&raw.end_time)?;
    if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
        return None;
    }

    Some(TripRecord::new(RawTrip {
        city: city.to_string(),
        row,
        start_time,
        end_time,
        start_station: raw.start_station,
        end_station: raw.end_station,
        trip_duration: raw.trip_duration.floor() as u64,
        user_type: non_empty(raw.user_type),
        gender: non_empty(raw.gender),
        birth_year: raw
            .birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.floor() as i32),
    }))
}

/// Parse a source timestamp in any of [`TIMESTAMP_FORMATS`].
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

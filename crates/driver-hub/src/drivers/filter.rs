//! Predicate composition for the driver roster and the history timeline.
//!
//! Every filter is a stable linear scan: the result is the ordered subsequence
//! of the input whose elements satisfy the predicate.

use super::domain::{
    parse_discriminant, Discriminant, Driver, DriverError, DriverStatus, HistoryEntry, HistoryKind,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub fn filter_records<T, P>(records: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records
        .iter()
        .filter(|record| predicate(record))
        .cloned()
        .collect()
}

/// Case-insensitive substring search. `needle` must already be lower-cased.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Categorical filter value: either everything, or a single discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Discriminant> Selection<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(value) => value.as_str(),
        }
    }
}

impl<T: Discriminant> FromStr for Selection<T> {
    type Err = DriverError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            parse_discriminant(raw).map(Self::Only)
        }
    }
}

impl<T: Discriminant> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<T: Discriminant> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster search: the text clause ORs name, email and license number, and is
/// ANDed with the status clause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriverQuery {
    pub search: String,
    pub status: Selection<DriverStatus>,
}

impl DriverQuery {
    pub fn new(search: impl Into<String>, status: Selection<DriverStatus>) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, driver: &Driver) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_folded(driver, &needle)
    }

    fn matches_folded(&self, driver: &Driver, needle: &str) -> bool {
        let text = contains_folded(&driver.name, needle)
            || contains_folded(&driver.email, needle)
            || contains_folded(&driver.license_number, needle);
        text && self.status.matches(driver.status)
    }

    pub fn apply(&self, drivers: &[Driver]) -> Vec<Driver> {
        let needle = self.search.to_lowercase();
        filter_records(drivers, |driver| self.matches_folded(driver, &needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const fn ordered() -> [Self; 4] {
        [Self::All, Self::Today, Self::Week, Self::Month]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Alle Zeiten",
            Self::Today => "Heute",
            Self::Week => "Letzte Woche",
            Self::Month => "Letzter Monat",
        }
    }

    /// `Today` compares calendar days; `Week` and `Month` compare instants
    /// against `now` minus 7×24h and 30×24h respectively.
    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Today => at.date_naive() == now.date_naive(),
            Self::Week => at >= now - Duration::hours(7 * 24),
            Self::Month => at >= now - Duration::hours(30 * 24),
        }
    }
}

impl FromStr for DateRange {
    type Err = DriverError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DriverError::UnknownDiscriminant {
                kind: "date range",
                value: raw.to_owned(),
            })
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, DriverError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DriverError::InvalidValue {
        field: "date",
        value: raw.to_owned(),
        expected: "YYYY-MM-DD",
    })
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD`, which is read as midnight UTC.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, DriverError> {
    let trimmed = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(at.with_timezone(&Utc));
    }
    parse_date(trimmed)
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| DriverError::InvalidValue {
            field: "instant",
            value: raw.to_owned(),
            expected: "RFC 3339 or YYYY-MM-DD",
        })
}

/// History search: description OR present details, ANDed with type and range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    pub search: String,
    pub kind: Selection<HistoryKind>,
    pub range: DateRange,
}

impl HistoryQuery {
    pub fn new(search: impl Into<String>, kind: Selection<HistoryKind>, range: DateRange) -> Self {
        Self {
            search: search.into(),
            kind,
            range,
        }
    }

    pub fn matches(&self, entry: &HistoryEntry, now: DateTime<Utc>) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_folded(entry, &needle, now)
    }

    fn matches_folded(&self, entry: &HistoryEntry, needle: &str, now: DateTime<Utc>) -> bool {
        let text = contains_folded(&entry.description, needle)
            || entry
                .details
                .as_deref()
                .is_some_and(|details| contains_folded(details, needle));
        text && self.kind.matches(entry.kind) && self.range.contains(entry.at, now)
    }

    pub fn apply(&self, entries: &[HistoryEntry], now: DateTime<Utc>) -> Vec<HistoryEntry> {
        let needle = self.search.to_lowercase();
        filter_records(entries, |entry| self.matches_folded(entry, &needle, now))
    }
}

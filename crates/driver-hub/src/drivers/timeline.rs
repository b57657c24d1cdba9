use super::domain::HistoryEntry;
use super::format::format_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// History entries sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub day: NaiveDate,
    /// de-DE formatted day, e.g. `15.1.2024`.
    pub key: String,
    pub entries: Vec<HistoryEntry>,
}

/// Buckets entries by calendar day (UTC).
///
/// Groups come back most recent day first; inside a group entries are sorted
/// newest first, ties keeping their input order.
pub fn group_by_date(entries: &[HistoryEntry]) -> Vec<DayGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<HistoryEntry>> = BTreeMap::new();
    for entry in entries {
        buckets
            .entry(entry.at.date_naive())
            .or_default()
            .push(entry.clone());
    }

    buckets
        .into_iter()
        .rev()
        .map(|(day, mut entries)| {
            entries.sort_by(|a, b| b.at.cmp(&a.at));
            DayGroup {
                day,
                key: format_date(day),
                entries,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "bucket", content = "value", rename_all = "snake_case")]
pub enum RelativeTime {
    JustNow,
    HoursAgo(i64),
    Yesterday,
    DaysAgo(i64),
    On(NaiveDate),
}

impl RelativeTime {
    /// Classifies the floor-hour distance between `at` and `now`.
    pub fn between(at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let hours = (now - at).num_milliseconds().div_euclid(3_600_000);
        Self::from_hours(hours, at.date_naive())
    }

    pub fn from_hours(hours: i64, day: NaiveDate) -> Self {
        if hours < 1 {
            Self::JustNow
        } else if hours < 24 {
            Self::HoursAgo(hours)
        } else if hours < 48 {
            Self::Yesterday
        } else if hours < 168 {
            Self::DaysAgo(hours.div_euclid(24))
        } else {
            Self::On(day)
        }
    }
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JustNow => f.write_str("Vor wenigen Minuten"),
            Self::HoursAgo(hours) => write!(f, "Vor {hours} Stunden"),
            Self::Yesterday => f.write_str("Gestern"),
            Self::DaysAgo(days) => write!(f, "Vor {days} Tagen"),
            Self::On(day) => f.write_str(&format_date(*day)),
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a driver in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub String);

impl DriverId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("driver {0} not found")]
    NotFound(DriverId),
    #[error("unknown {kind} '{value}'")]
    UnknownDiscriminant { kind: &'static str, value: String },
    #[error("unknown profile tab '{0}'")]
    UnknownTab(String),
    #[error("invalid {field} '{value}', expected {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("history export failed: {0}")]
    Export(#[from] csv::Error),
}

/// A closed, enum-valued field used for categorical filtering and counting.
///
/// `variants` lists every value in display order; summaries iterate it so that
/// counts come out in a stable order and cover the whole enum.
pub trait Discriminant: Copy + Eq + fmt::Debug + 'static {
    const KIND: &'static str;

    fn variants() -> &'static [Self];

    /// Wire name, as used in query strings and JSON.
    fn as_str(self) -> &'static str;

    /// German display label.
    fn label(self) -> &'static str;
}

pub fn parse_discriminant<T: Discriminant>(raw: &str) -> Result<T, DriverError> {
    let wanted = raw.trim();
    T::variants()
        .iter()
        .copied()
        .find(|variant| variant.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| DriverError::UnknownDiscriminant {
            kind: T::KIND,
            value: raw.to_owned(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Active,
    Inactive,
    Suspended,
}

impl Discriminant for DriverStatus {
    const KIND: &'static str = "driver status";

    fn variants() -> &'static [Self] {
        &[Self::Active, Self::Inactive, Self::Suspended]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Aktiv",
            Self::Inactive => "Inaktiv",
            Self::Suspended => "Gesperrt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Vehicle,
    Device,
    Equipment,
}

impl Discriminant for AssetKind {
    const KIND: &'static str = "asset type";

    fn variants() -> &'static [Self] {
        &[Self::Vehicle, Self::Device, Self::Equipment]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Device => "device",
            Self::Equipment => "equipment",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "Fahrzeug",
            Self::Device => "Gerät",
            Self::Equipment => "Ausrüstung",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    Maintenance,
    Retired,
}

impl Discriminant for AssetStatus {
    const KIND: &'static str = "asset status";

    fn variants() -> &'static [Self] {
        &[Self::Active, Self::Maintenance, Self::Retired]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Aktiv",
            Self::Maintenance => "Wartung",
            Self::Retired => "Außer Betrieb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Valid,
    Expired,
    Pending,
}

impl Discriminant for DocumentStatus {
    const KIND: &'static str = "document status";

    fn variants() -> &'static [Self] {
        &[Self::Valid, Self::Expired, Self::Pending]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Pending => "pending",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Valid => "Gültig",
            Self::Expired => "Abgelaufen",
            Self::Pending => "Ausstehend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl Discriminant for AccountStatus {
    const KIND: &'static str = "account status";

    fn variants() -> &'static [Self] {
        &[Self::Active, Self::Inactive]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Aktiv",
            Self::Inactive => "Inaktiv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Trip,
    Payment,
    Document,
    StatusChange,
}

impl Discriminant for HistoryKind {
    const KIND: &'static str = "history type";

    fn variants() -> &'static [Self] {
        &[Self::Trip, Self::Payment, Self::Document, Self::StatusChange]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Payment => "payment",
            Self::Document => "document",
            Self::StatusChange => "status_change",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Trip => "Fahrt",
            Self::Payment => "Zahlung",
            Self::Document => "Dokument",
            Self::StatusChange => "Status",
        }
    }
}

macro_rules! from_str_via_discriminant {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = DriverError;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    parse_discriminant(raw)
                }
            }
        )+
    };
}

from_str_via_discriminant!(
    DriverStatus,
    AssetKind,
    AssetStatus,
    DocumentStatus,
    AccountStatus,
    HistoryKind,
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: DriverStatus,
    pub license_number: String,
    pub vehicle_type: String,
    pub join_date: NaiveDate,
    pub rating: f32,
    pub total_trips: u32,
    pub total_earnings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Driver {
    /// First letter of every name part, e.g. "MM" for "Max Mustermann".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub status: AssetStatus,
    pub assigned_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Free-text category such as "Führerschein".
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub uploaded_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    pub status: DocumentStatus,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAccount {
    pub id: String,
    pub platform: String,
    pub username: String,
    pub status: AccountStatus,
    pub joined_on: NaiveDate,
    pub rating: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Derived view over a driver's trip and rating figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub rating: f32,
    pub total_trips: u32,
    pub completed_trips: u32,
    pub cancelled_trips: u32,
    pub total_earnings: f64,
    pub average_rating: f32,
    pub on_time_pct: u8,
    pub customer_satisfaction_pct: u8,
}

impl PerformanceMetrics {
    pub fn earnings_per_trip(&self) -> f64 {
        if self.total_trips == 0 {
            0.0
        } else {
            self.total_earnings / f64::from(self.total_trips)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_discriminants_case_insensitively() {
        assert_eq!(
            "SUSPENDED".parse::<DriverStatus>().expect("status parses"),
            DriverStatus::Suspended
        );
        assert_eq!(
            "status_change".parse::<HistoryKind>().expect("kind parses"),
            HistoryKind::StatusChange
        );
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let err = "archived".parse::<AssetStatus>().unwrap_err();
        assert!(matches!(
            err,
            DriverError::UnknownDiscriminant { kind: "asset status", ref value } if value == "archived"
        ));
    }

    #[test]
    fn initials_take_first_letter_of_each_name_part() {
        let driver = Driver {
            id: DriverId::new("9"),
            name: "Anna Maria Schmidt".to_string(),
            email: String::new(),
            phone: String::new(),
            status: DriverStatus::Active,
            license_number: String::new(),
            vehicle_type: String::new(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            rating: 4.0,
            total_trips: 0,
            total_earnings: 0.0,
            avatar: None,
        };
        assert_eq!(driver.initials(), "AMS");
    }

    #[test]
    fn every_variant_has_a_distinct_wire_name() {
        for kind in HistoryKind::variants() {
            let parsed: HistoryKind = kind.as_str().parse().expect("round trips");
            assert_eq!(parsed, *kind);
        }
    }
}

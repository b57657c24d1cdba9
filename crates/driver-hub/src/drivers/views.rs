use super::domain::{
    AccountStatus, Asset, AssetKind, AssetStatus, Discriminant, Document, DocumentStatus, Driver,
    DriverStatus, HistoryEntry, HistoryKind, PlatformAccount,
};
use super::filter::{DriverQuery, HistoryQuery};
use super::format::{format_count, format_currency_whole, format_date, format_time};
use super::summary::{DriverSummary, HistorySummary};
use super::timeline::{DayGroup, RelativeTime};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

pub const NO_DRIVERS_MESSAGE: &str = "Keine Fahrer gefunden, die Ihren Suchkriterien entsprechen.";
pub const NO_HISTORY_MESSAGE: &str = "Keine Aktivitäten gefunden.";

#[derive(Debug, Clone, Serialize)]
pub struct DriverRowView {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub status: DriverStatus,
    pub status_label: &'static str,
    pub license_number: String,
    pub vehicle_type: String,
    pub rating: f32,
    pub total_trips: u32,
    pub trips_label: String,
    pub earnings_label: String,
    pub joined_on: NaiveDate,
    pub joined_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl From<&Driver> for DriverRowView {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id.to_string(),
            name: driver.name.clone(),
            initials: driver.initials(),
            email: driver.email.clone(),
            phone: driver.phone.clone(),
            status: driver.status,
            status_label: driver.status.label(),
            license_number: driver.license_number.clone(),
            vehicle_type: driver.vehicle_type.clone(),
            rating: driver.rating,
            total_trips: driver.total_trips,
            trips_label: format_count(u64::from(driver.total_trips)),
            earnings_label: format_currency_whole(driver.total_earnings),
            joined_on: driver.join_date,
            joined_label: format_date(driver.join_date),
            avatar: driver.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterView {
    pub query: DriverQuery,
    pub headline: String,
    pub summary: DriverSummary,
    pub drivers: Vec<DriverRowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl RosterView {
    pub fn new(query: DriverQuery, all: &[Driver], matched: &[Driver]) -> Self {
        let summary = DriverSummary::new(all, matched.len());
        Self {
            query,
            headline: summary.headline(),
            summary,
            drivers: matched.iter().map(DriverRowView::from).collect(),
            empty_message: matched.is_empty().then_some(NO_DRIVERS_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    pub id: String,
    pub kind: AssetKind,
    pub kind_label: &'static str,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub status: AssetStatus,
    pub status_label: &'static str,
    pub assigned_label: String,
}

impl From<&Asset> for AssetView {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            kind: asset.kind,
            kind_label: asset.kind.label(),
            name: asset.name.clone(),
            model: asset.model.clone(),
            serial_number: asset.serial_number.clone(),
            status: asset.status,
            status_label: asset.status.label(),
            assigned_label: format_date(asset.assigned_on),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub id: String,
    pub document_type: String,
    pub name: String,
    pub uploaded_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_label: Option<String>,
    pub status: DocumentStatus,
    pub status_label: &'static str,
    pub expiring_soon: bool,
    pub file_url: String,
}

impl DocumentView {
    pub fn new(document: &Document, expiring_soon: bool) -> Self {
        Self {
            id: document.id.clone(),
            document_type: document.kind.clone(),
            name: document.name.clone(),
            uploaded_label: format_date(document.uploaded_on),
            expires_label: document.expires_on.map(format_date),
            status: document.status,
            status_label: document.status.label(),
            expiring_soon,
            file_url: document.file_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: String,
    pub platform: String,
    pub badge: String,
    pub username: String,
    pub status: AccountStatus,
    pub status_label: &'static str,
    pub enabled: bool,
    pub joined_label: String,
    pub rating: f32,
}

impl From<&PlatformAccount> for AccountView {
    fn from(account: &PlatformAccount) -> Self {
        Self {
            id: account.id.clone(),
            platform: account.platform.clone(),
            badge: account.platform.chars().take(1).collect(),
            username: account.username.clone(),
            status: account.status,
            status_label: account.status.label(),
            enabled: account.status == AccountStatus::Active,
            joined_label: format_date(account.joined_on),
            rating: account.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntryView {
    pub id: String,
    pub at: DateTime<Utc>,
    pub time: String,
    pub kind: HistoryKind,
    pub kind_label: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub relative: String,
}

impl TimelineEntryView {
    pub fn new(entry: &HistoryEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.id.clone(),
            at: entry.at,
            time: format_time(entry.at),
            kind: entry.kind,
            kind_label: entry.kind.label(),
            description: entry.description.clone(),
            details: entry.details.clone(),
            relative: RelativeTime::between(entry.at, now).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayGroupView {
    pub day: NaiveDate,
    pub key: String,
    pub entries: Vec<TimelineEntryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineView {
    pub query: HistoryQuery,
    /// Counts over the full, unfiltered history.
    pub summary: HistorySummary,
    pub shown: usize,
    pub groups: Vec<DayGroupView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl TimelineView {
    pub fn new(
        query: HistoryQuery,
        history: &[HistoryEntry],
        groups: &[DayGroup],
        now: DateTime<Utc>,
    ) -> Self {
        let shown = groups.iter().map(|group| group.entries.len()).sum();
        let groups = groups
            .iter()
            .map(|group| DayGroupView {
                day: group.day,
                key: group.key.clone(),
                entries: group
                    .entries
                    .iter()
                    .map(|entry| TimelineEntryView::new(entry, now))
                    .collect(),
            })
            .collect();

        Self {
            query,
            summary: HistorySummary::from_entries(history),
            shown,
            groups,
            empty_message: (shown == 0).then_some(NO_HISTORY_MESSAGE),
        }
    }
}

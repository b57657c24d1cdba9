use super::documents::ExpiryWindow;
use super::domain::{
    AccountStatus, Asset, AssetStatus, Discriminant, Document, DocumentStatus, Driver,
    DriverStatus, HistoryEntry, HistoryKind, PlatformAccount,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry<K> {
    pub value: K,
    pub label: &'static str,
    pub count: usize,
}

/// Per-value counts over a discriminant, in the discriminant's display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally<K> {
    pub total: usize,
    pub counts: Vec<CountEntry<K>>,
}

impl<K: Discriminant> Tally<K> {
    pub fn count(&self, value: K) -> usize {
        self.counts
            .iter()
            .find(|entry| entry.value == value)
            .map_or(0, |entry| entry.count)
    }
}

pub fn tally<T, K, F>(records: &[T], discriminant: F) -> Tally<K>
where
    K: Discriminant,
    F: Fn(&T) -> K,
{
    let mut counts: Vec<CountEntry<K>> = K::variants()
        .iter()
        .map(|&value| CountEntry {
            value,
            label: value.label(),
            count: 0,
        })
        .collect();

    for record in records {
        let value = discriminant(record);
        if let Some(entry) = counts.iter_mut().find(|entry| entry.value == value) {
            entry.count += 1;
        }
    }

    Tally {
        total: records.len(),
        counts,
    }
}

/// Roster header: "N von M Fahrern" plus the status split of the full roster.
#[derive(Debug, Clone, Serialize)]
pub struct DriverSummary {
    pub shown: usize,
    pub total: usize,
    pub by_status: Tally<DriverStatus>,
}

impl DriverSummary {
    pub fn new(all: &[Driver], shown: usize) -> Self {
        Self {
            shown,
            total: all.len(),
            by_status: tally(all, |driver| driver.status),
        }
    }

    pub fn headline(&self) -> String {
        format!("{} von {} Fahrern", self.shown, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub retired: usize,
}

impl AssetSummary {
    pub fn from_assets(assets: &[Asset]) -> Self {
        let by_status = tally(assets, |asset| asset.status);
        Self {
            total: by_status.total,
            active: by_status.count(AssetStatus::Active),
            maintenance: by_status.count(AssetStatus::Maintenance),
            retired: by_status.count(AssetStatus::Retired),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub total: usize,
    pub valid: usize,
    pub expired: usize,
    pub pending: usize,
    pub expiring_soon: usize,
}

impl DocumentSummary {
    pub fn from_documents(
        documents: &[Document],
        now: DateTime<Utc>,
        window: ExpiryWindow,
    ) -> Self {
        let by_status = tally(documents, |document| document.status);
        let expiring_soon = documents
            .iter()
            .filter(|document| window.is_expiring_soon(document.expires_on, now))
            .count();

        Self {
            total: by_status.total,
            valid: by_status.count(DocumentStatus::Valid),
            expired: by_status.count(DocumentStatus::Expired),
            pending: by_status.count(DocumentStatus::Pending),
            expiring_soon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccountSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Mean platform rating; 0 when no accounts are connected.
    pub average_rating: f32,
}

impl AccountSummary {
    pub fn from_accounts(accounts: &[PlatformAccount]) -> Self {
        let by_status = tally(accounts, |account| account.status);
        let average_rating = if accounts.is_empty() {
            0.0
        } else {
            accounts.iter().map(|account| account.rating).sum::<f32>() / accounts.len() as f32
        };

        Self {
            total: by_status.total,
            active: by_status.count(AccountStatus::Active),
            inactive: by_status.count(AccountStatus::Inactive),
            average_rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total: usize,
    pub trips: usize,
    pub payments: usize,
    pub documents: usize,
    pub status_changes: usize,
}

impl HistorySummary {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let by_kind = tally(entries, |entry| entry.kind);
        Self {
            total: by_kind.total,
            trips: by_kind.count(HistoryKind::Trip),
            payments: by_kind.count(HistoryKind::Payment),
            documents: by_kind.count(HistoryKind::Document),
            status_changes: by_kind.count(HistoryKind::StatusChange),
        }
    }
}

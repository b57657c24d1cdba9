use super::domain::{Discriminant, Document, DocumentStatus};
use super::summary::DocumentSummary;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Document categories every driver has to keep on file.
pub const REQUIRED_DOCUMENT_TYPES: [&str; 5] = [
    "Führerschein",
    "Personalausweis",
    "Gesundheitszeugnis",
    "Gewerbeschein",
    "Versicherungsnachweis",
];

pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;

/// Look-ahead used to flag documents that run out soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpiryWindow {
    days: u32,
}

impl Default for ExpiryWindow {
    fn default() -> Self {
        Self::days(DEFAULT_EXPIRY_WINDOW_DAYS)
    }
}

impl ExpiryWindow {
    pub const fn days(days: u32) -> Self {
        Self { days }
    }

    pub const fn length_days(self) -> u32 {
        self.days
    }

    /// `now < expiry <= now + window`, with the expiry day taken as midnight UTC.
    pub fn is_expiring_soon(self, expires_on: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
        let Some(expires_on) = expires_on else {
            return false;
        };
        let expiry = expires_on.and_time(NaiveTime::MIN).and_utc();
        let horizon = now + Duration::days(i64::from(self.days));
        expiry > now && expiry <= horizon
    }
}

pub fn is_expiring_soon(expires_on: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    ExpiryWindow::default().is_expiring_soon(expires_on, now)
}

/// Required types with no document of that type on file, in required order.
pub fn missing_documents<'a>(required: &[&'a str], documents: &[Document]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|wanted| !documents.iter().any(|document| document.kind == *wanted))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChecklistState {
    Present {
        document_id: String,
        status: DocumentStatus,
        status_label: &'static str,
        expiring_soon: bool,
    },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub document_type: &'static str,
    #[serde(flatten)]
    pub state: ChecklistState,
}

/// One row per required type, pointing at the first document of that type.
pub fn document_checklist(
    documents: &[Document],
    now: DateTime<Utc>,
    window: ExpiryWindow,
) -> Vec<ChecklistItem> {
    REQUIRED_DOCUMENT_TYPES
        .iter()
        .map(|&document_type| {
            let state = match documents
                .iter()
                .find(|document| document.kind == document_type)
            {
                Some(document) => ChecklistState::Present {
                    document_id: document.id.clone(),
                    status: document.status,
                    status_label: document.status.label(),
                    expiring_soon: window.is_expiring_soon(document.expires_on, now),
                },
                None => ChecklistState::Missing,
            };
            ChecklistItem {
                document_type,
                state,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentAlert {
    Expired { count: usize },
    ExpiringSoon { count: usize, window_days: u32 },
    Missing { document_types: Vec<&'static str> },
}

impl DocumentAlert {
    pub fn message(&self) -> String {
        match self {
            Self::Expired { count } => format!(
                "{count} Dokument(e) sind abgelaufen und müssen erneuert werden."
            ),
            Self::ExpiringSoon { count, window_days } => format!(
                "{count} Dokument(e) laufen in den nächsten {window_days} Tagen ab."
            ),
            Self::Missing { document_types } => {
                format!("Folgende Dokumente fehlen: {}", document_types.join(", "))
            }
        }
    }
}

pub fn document_alerts(
    summary: &DocumentSummary,
    missing: &[&'static str],
    window: ExpiryWindow,
) -> Vec<DocumentAlert> {
    let mut alerts = Vec::new();
    if summary.expired > 0 {
        alerts.push(DocumentAlert::Expired {
            count: summary.expired,
        });
    }
    if summary.expiring_soon > 0 {
        alerts.push(DocumentAlert::ExpiringSoon {
            count: summary.expiring_soon,
            window_days: window.length_days(),
        });
    }
    if !missing.is_empty() {
        alerts.push(DocumentAlert::Missing {
            document_types: missing.to_vec(),
        });
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::provider::sample_documents;
    use chrono::TimeZone;

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn expiring_soon_literals() {
        let now = new_year();
        assert!(is_expiring_soon(date(2024, 1, 20), now));
        assert!(!is_expiring_soon(date(2024, 2, 15), now));
        assert!(!is_expiring_soon(date(2023, 12, 31), now));
        assert!(!is_expiring_soon(None, now));
    }

    #[test]
    fn window_upper_bound_is_inclusive() {
        let now = new_year();
        assert!(is_expiring_soon(date(2024, 1, 31), now));
        assert!(!is_expiring_soon(date(2024, 2, 1), now));
        assert!(!is_expiring_soon(date(2024, 1, 1), now));
    }

    #[test]
    fn custom_window_narrows_the_horizon() {
        let now = new_year();
        let week = ExpiryWindow::days(7);
        assert!(week.is_expiring_soon(date(2024, 1, 8), now));
        assert!(!week.is_expiring_soon(date(2024, 1, 20), now));
    }

    #[test]
    fn missing_documents_is_a_set_difference_in_required_order() {
        let missing = missing_documents(&REQUIRED_DOCUMENT_TYPES, &sample_documents());
        assert_eq!(missing, vec!["Gewerbeschein", "Versicherungsnachweis"]);
    }

    #[test]
    fn duplicate_documents_do_not_affect_missing_set() {
        let mut documents = sample_documents();
        documents.push(documents[0].clone());
        let missing = missing_documents(&REQUIRED_DOCUMENT_TYPES, &documents);
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn checklist_marks_present_and_missing_types() {
        let checklist = document_checklist(&sample_documents(), new_year(), ExpiryWindow::default());
        assert_eq!(checklist.len(), REQUIRED_DOCUMENT_TYPES.len());
        assert!(matches!(
            checklist[2].state,
            ChecklistState::Present {
                status: DocumentStatus::Expired,
                expiring_soon: true,
                ..
            }
        ));
        assert_eq!(checklist[3].state, ChecklistState::Missing);
    }

    #[test]
    fn alerts_are_ordered_expired_expiring_missing() {
        let documents = sample_documents();
        let window = ExpiryWindow::default();
        let summary = DocumentSummary::from_documents(&documents, new_year(), window);
        let missing = missing_documents(&REQUIRED_DOCUMENT_TYPES, &documents);

        let alerts = document_alerts(&summary, &missing, window);
        let messages: Vec<_> = alerts.iter().map(DocumentAlert::message).collect();
        assert_eq!(
            messages,
            vec![
                "1 Dokument(e) sind abgelaufen und müssen erneuert werden.".to_string(),
                "1 Dokument(e) laufen in den nächsten 30 Tagen ab.".to_string(),
                "Folgende Dokumente fehlen: Gewerbeschein, Versicherungsnachweis".to_string(),
            ]
        );
    }
}

use chrono::{DateTime, TimeZone, Utc};
use driver_hub::drivers::documents::{is_expiring_soon, missing_documents, DocumentAlert};
use driver_hub::drivers::domain::{
    Asset, Document, Driver, DriverError, DriverId, HistoryEntry, PerformanceMetrics,
    PersonalData, PlatformAccount,
};
use driver_hub::drivers::profile::build_tab;
use driver_hub::drivers::provider::{derive_metrics, sample_documents, sample_drivers};
use driver_hub::drivers::{
    DriverDeskService, DriverDirectory, ExpiryWindow, HistoryQuery, ProfileTab, SampleDirectory,
    TabContent, REQUIRED_DOCUMENT_TYPES,
};
use std::sync::Arc;

fn new_year() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid instant")
}

/// Directory whose drivers have nothing on file.
struct BareDirectory;

impl DriverDirectory for BareDirectory {
    fn drivers(&self) -> Vec<Driver> {
        sample_drivers().into_iter().take(1).collect()
    }

    fn personal_data(&self, id: &DriverId) -> Result<PersonalData, DriverError> {
        Err(DriverError::NotFound(id.clone()))
    }

    fn performance_metrics(&self, id: &DriverId) -> Result<PerformanceMetrics, DriverError> {
        self.driver(id).map(|driver| derive_metrics(&driver))
    }

    fn assets(&self, id: &DriverId) -> Result<Vec<Asset>, DriverError> {
        self.driver(id).map(|_| Vec::new())
    }

    fn documents(&self, id: &DriverId) -> Result<Vec<Document>, DriverError> {
        self.driver(id).map(|_| Vec::new())
    }

    fn platform_accounts(&self, id: &DriverId) -> Result<Vec<PlatformAccount>, DriverError> {
        self.driver(id).map(|_| Vec::new())
    }

    fn history(&self, id: &DriverId) -> Result<Vec<HistoryEntry>, DriverError> {
        self.driver(id).map(|_| Vec::new())
    }
}

#[test]
fn expiry_literals_at_new_year() {
    let now = new_year();
    let date = |y, m, d| chrono::NaiveDate::from_ymd_opt(y, m, d);
    assert!(is_expiring_soon(date(2024, 1, 20), now));
    assert!(!is_expiring_soon(date(2024, 2, 15), now));
    assert!(!is_expiring_soon(date(2023, 12, 31), now));
    assert!(!is_expiring_soon(None, now));
}

#[test]
fn sample_documents_miss_trade_licence_and_insurance() {
    assert_eq!(
        missing_documents(&REQUIRED_DOCUMENT_TYPES, &sample_documents()),
        vec!["Gewerbeschein", "Versicherungsnachweis"]
    );
}

#[test]
fn documents_tab_flags_expiring_health_certificate() {
    let desk = DriverDeskService::new(Arc::new(SampleDirectory::new()));
    let content = desk
        .tab(&DriverId::new("1"), ProfileTab::Documents, HistoryQuery::default(), new_year())
        .expect("known driver");
    let TabContent::Documents(tab) = content else {
        panic!("expected documents tab");
    };

    assert_eq!(tab.summary.expiring_soon, 1);
    let flagged: Vec<_> = tab
        .documents
        .iter()
        .filter(|document| document.expiring_soon)
        .map(|document| document.document_type.as_str())
        .collect();
    assert_eq!(flagged, vec!["Gesundheitszeugnis"]);
    assert_eq!(tab.alerts.len(), 3);
}

#[test]
fn empty_directory_reports_every_document_missing() {
    let directory = BareDirectory;
    let id = DriverId::new("1");
    let context = driver_hub::drivers::profile::TabContext {
        now: new_year(),
        expiry: ExpiryWindow::default(),
        history: HistoryQuery::default(),
    };

    let TabContent::Documents(tab) =
        build_tab(&directory, &id, ProfileTab::Documents, &context).expect("known driver")
    else {
        panic!("expected documents tab");
    };
    assert_eq!(tab.missing.len(), REQUIRED_DOCUMENT_TYPES.len());
    assert_eq!(
        tab.alerts,
        vec![DocumentAlert::Missing {
            document_types: REQUIRED_DOCUMENT_TYPES.to_vec()
        }]
    );

    let TabContent::Platforms(platforms) =
        build_tab(&directory, &id, ProfileTab::Platforms, &context).expect("known driver")
    else {
        panic!("expected platforms tab");
    };
    assert_eq!(platforms.summary.average_rating, 0.0);
    assert!(platforms.catalogue.iter().all(|offer| !offer.connected));

    assert!(matches!(
        build_tab(&directory, &id, ProfileTab::Personal, &context),
        Err(DriverError::NotFound(_))
    ));
}

#[test]
fn performance_tab_compares_against_goals() {
    let desk = DriverDeskService::new(Arc::new(SampleDirectory::new()));
    let content = desk
        .tab(&DriverId::new("2"), ProfileTab::Performance, HistoryQuery::default(), new_year())
        .expect("known driver");
    let TabContent::Performance(tab) = content else {
        panic!("expected performance tab");
    };

    assert_eq!(tab.metrics.total_trips, 2100);
    assert_eq!(tab.trips_label(), "2.100");
    assert_eq!(tab.earnings_label, "28.900,75\u{a0}€");
    let rating = tab
        .goals
        .iter()
        .find(|goal| goal.title == "Bewertung")
        .expect("rating goal");
    assert!(rating.achieved);
    assert_eq!(tab.weekly.len(), 7);
    assert_eq!(tab.achievements.len(), 4);
}

#[test]
fn personal_tab_lists_fields_in_form_order() {
    let desk = DriverDeskService::new(Arc::new(SampleDirectory::new()));
    let content = desk
        .tab(&DriverId::new("5"), ProfileTab::Personal, HistoryQuery::default(), new_year())
        .expect("known driver");
    let TabContent::Personal(tab) = content else {
        panic!("expected personal tab");
    };
    assert_eq!(tab.fields[0].value, "Michael");
    assert_eq!(tab.fields[1].value, "Bauer");
    assert_eq!(tab.fields[2].value, "15.6.1985");
}

#[test]
fn custom_expiry_window_is_honoured() {
    let desk = DriverDeskService::with_expiry_window(
        Arc::new(SampleDirectory::new()),
        ExpiryWindow::days(10),
    );
    assert_eq!(desk.expiry_window().length_days(), 10);
    let content = desk
        .tab(&DriverId::new("1"), ProfileTab::Documents, HistoryQuery::default(), new_year())
        .expect("known driver");
    let TabContent::Documents(tab) = content else {
        panic!("expected documents tab");
    };
    assert_eq!(tab.summary.expiring_soon, 0);
}

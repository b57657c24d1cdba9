use super::documents::{
    document_alerts, document_checklist, missing_documents, ChecklistItem, DocumentAlert,
    ExpiryWindow, REQUIRED_DOCUMENT_TYPES,
};
use super::domain::{
    Asset, Document, Driver, DriverError, DriverId, DriverStatus, PerformanceMetrics, PersonalData,
    PlatformAccount,
};
use super::draft::PersonalField;
use super::filter::HistoryQuery;
use super::format::{
    format_count, format_currency, format_currency_whole, format_date, format_long_date,
};
use super::provider::DriverDirectory;
use super::summary::{AccountSummary, AssetSummary, DocumentSummary};
use super::timeline::group_by_date;
use super::views::{AccountView, AssetView, DocumentView, DriverRowView, TimelineView};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTab {
    #[default]
    Overview,
    Performance,
    Personal,
    Assets,
    Documents,
    Platforms,
    History,
}

impl ProfileTab {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Overview,
            Self::Performance,
            Self::Personal,
            Self::Assets,
            Self::Documents,
            Self::Platforms,
            Self::History,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Performance => "performance",
            Self::Personal => "personal",
            Self::Assets => "assets",
            Self::Documents => "documents",
            Self::Platforms => "platforms",
            Self::History => "history",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Übersicht",
            Self::Performance => "Leistung",
            Self::Personal => "Persönliche Daten",
            Self::Assets => "Assets",
            Self::Documents => "Dokumente",
            Self::Platforms => "Plattformen",
            Self::History => "Verlauf",
        }
    }
}

impl FromStr for ProfileTab {
    type Err = DriverError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|tab| tab.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DriverError::UnknownTab(raw.to_owned()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TabLink {
    pub tab: ProfileTab,
    pub label: &'static str,
}

/// Inputs a tab needs besides the driver: the evaluation instant, the expiry
/// look-ahead and the history filter.
#[derive(Debug, Clone, Default)]
pub struct TabContext {
    pub now: DateTime<Utc>,
    pub expiry: ExpiryWindow,
    pub history: HistoryQuery,
}

impl TabContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileHeader {
    pub driver: DriverRowView,
    pub joined_long: String,
    pub tabs: Vec<TabLink>,
}

impl ProfileHeader {
    pub fn new(driver: &Driver) -> Self {
        Self {
            driver: DriverRowView::from(driver),
            joined_long: format_long_date(driver.join_date),
            tabs: ProfileTab::ordered()
                .into_iter()
                .map(|tab| TabLink {
                    tab,
                    label: tab.label(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabContent {
    Overview(OverviewTab),
    Performance(PerformanceTab),
    Personal(PersonalTab),
    Assets(AssetsTab),
    Documents(DocumentsTab),
    Platforms(PlatformsTab),
    History(TimelineView),
}

impl TabContent {
    pub fn tab(&self) -> ProfileTab {
        match self {
            Self::Overview(_) => ProfileTab::Overview,
            Self::Performance(_) => ProfileTab::Performance,
            Self::Personal(_) => ProfileTab::Personal,
            Self::Assets(_) => ProfileTab::Assets,
            Self::Documents(_) => ProfileTab::Documents,
            Self::Platforms(_) => ProfileTab::Platforms,
            Self::History(_) => ProfileTab::History,
        }
    }
}

pub fn build_tab<D>(
    directory: &D,
    id: &DriverId,
    tab: ProfileTab,
    context: &TabContext,
) -> Result<TabContent, DriverError>
where
    D: DriverDirectory + ?Sized,
{
    let content = match tab {
        ProfileTab::Overview => TabContent::Overview(OverviewTab::new(&directory.driver(id)?)),
        ProfileTab::Performance => {
            TabContent::Performance(PerformanceTab::new(directory.performance_metrics(id)?))
        }
        ProfileTab::Personal => TabContent::Personal(PersonalTab::new(directory.personal_data(id)?)),
        ProfileTab::Assets => {
            let assets = directory.assets(id)?;
            TabContent::Assets(AssetsTab::new(&assets))
        }
        ProfileTab::Documents => TabContent::Documents(DocumentsTab::new(
            &directory.documents(id)?,
            context.now,
            context.expiry,
        )),
        ProfileTab::Platforms => {
            let accounts = directory.platform_accounts(id)?;
            TabContent::Platforms(PlatformsTab {
                summary: AccountSummary::from_accounts(&accounts),
                catalogue: platform_catalogue(&accounts),
                accounts: accounts.iter().map(AccountView::from).collect(),
            })
        }
        ProfileTab::History => {
            let history = directory.history(id)?;
            let matched = context.history.apply(&history, context.now);
            let groups = group_by_date(&matched);
            TabContent::History(TimelineView::new(
                context.history.clone(),
                &history,
                &groups,
                context.now,
            ))
        }
    };
    Ok(content)
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySnapshot {
    pub trips: u32,
    pub earnings: f64,
    pub earnings_label: String,
    pub hours: u32,
    pub average_rating: f32,
    pub trips_change_pct: i32,
    pub earnings_change_pct: i32,
    pub hours_change_pct: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub kind: &'static str,
    pub description: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticePriority {
    Low,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub priority: NoticePriority,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewTab {
    pub weekly: WeeklySnapshot,
    pub recent_activity: Vec<ActivityItem>,
    pub notices: Vec<Notice>,
    pub details: DriverRowView,
}

impl OverviewTab {
    pub fn new(driver: &Driver) -> Self {
        let earnings = 1240.0;
        Self {
            weekly: WeeklySnapshot {
                trips: 47,
                earnings,
                earnings_label: format_currency_whole(earnings),
                hours: 38,
                average_rating: 4.8,
                trips_change_pct: 12,
                earnings_change_pct: -5,
                hours_change_pct: 8,
            },
            recent_activity: vec![
                ActivityItem {
                    kind: "trip",
                    description: "Fahrt nach München abgeschlossen",
                    time: "vor 2 Std.",
                    status: "completed",
                },
                ActivityItem {
                    kind: "rating",
                    description: "5-Sterne Bewertung erhalten",
                    time: "vor 4 Std.",
                    status: "positive",
                },
                ActivityItem {
                    kind: "document",
                    description: "Führerschein erneuert",
                    time: "vor 1 Tag",
                    status: "updated",
                },
                ActivityItem {
                    kind: "trip",
                    description: "Fahrt nach Hamburg abgeschlossen",
                    time: "vor 1 Tag",
                    status: "completed",
                },
            ],
            notices: vec![
                Notice {
                    priority: NoticePriority::Medium,
                    message: "Fahrzeuginspektion fällig in 15 Tagen",
                },
                Notice {
                    priority: NoticePriority::Low,
                    message: "Neue Bonusregelung verfügbar",
                },
            ],
            details: DriverRowView::from(driver),
        }
    }

    pub fn is_active(&self) -> bool {
        self.details.status == DriverStatus::Active
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub title: &'static str,
    pub current: f32,
    pub target: f32,
    pub unit: &'static str,
    pub progress_pct: f32,
    pub achieved: bool,
}

impl GoalProgress {
    pub fn new(title: &'static str, current: f32, target: f32, unit: &'static str) -> Self {
        let progress_pct = if target > 0.0 {
            (current / target * 100.0).min(100.0)
        } else {
            100.0
        };
        Self {
            title,
            current,
            target,
            unit,
            progress_pct,
            achieved: current >= target,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayStat {
    pub day: &'static str,
    pub trips: u32,
    pub earnings: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub achieved_on: NaiveDate,
    pub achieved_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceTab {
    pub metrics: PerformanceMetrics,
    pub earnings_label: String,
    pub earnings_per_trip_label: String,
    pub goals: Vec<GoalProgress>,
    pub weekly: Vec<DayStat>,
    pub achievements: Vec<Achievement>,
    pub insights: Vec<&'static str>,
}

impl PerformanceTab {
    pub fn new(metrics: PerformanceMetrics) -> Self {
        let goals = vec![
            GoalProgress::new("Monatliche Fahrten", 85.0, 100.0, "Fahrten"),
            GoalProgress::new("Bewertung", metrics.rating, 4.8, "★"),
            GoalProgress::new("Pünktlichkeit", f32::from(metrics.on_time_pct), 90.0, "%"),
            GoalProgress::new(
                "Kundenzufriedenheit",
                f32::from(metrics.customer_satisfaction_pct),
                95.0,
                "%",
            ),
        ];

        let weekly = [
            ("Mo", 12, 180.0),
            ("Di", 15, 225.0),
            ("Mi", 18, 270.0),
            ("Do", 14, 210.0),
            ("Fr", 20, 300.0),
            ("Sa", 25, 375.0),
            ("So", 16, 240.0),
        ]
        .into_iter()
        .map(|(day, trips, earnings)| DayStat {
            day,
            trips,
            earnings,
        })
        .collect();

        let achievements = [
            ("100 Fahrten Milestone", "Erste 100 Fahrten abgeschlossen", (2023, 2, 15)),
            ("Top Performer", "Unter den besten 10% der Fahrer", (2023, 3, 1)),
            ("5-Sterne Bewertung", "50 aufeinanderfolgende 5-Sterne Bewertungen", (2023, 3, 15)),
            ("Pünktlichkeits-Champion", "95% Pünktlichkeitsrate erreicht", (2023, 4, 1)),
        ]
        .into_iter()
        .filter_map(|(title, description, (year, month, day))| {
            let achieved_on = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(Achievement {
                title,
                description,
                achieved_on,
                achieved_label: format_date(achieved_on),
            })
        })
        .collect();

        Self {
            earnings_label: format_currency(metrics.total_earnings),
            earnings_per_trip_label: format_currency(metrics.earnings_per_trip()),
            metrics,
            goals,
            weekly,
            achievements,
            insights: vec![
                "Ihre Bewertung liegt 15% über dem Durchschnitt. Kunden schätzen besonders Ihre Pünktlichkeit.",
                "Ihre Stornierungsrate könnte verbessert werden. Versuchen Sie, nur Fahrten anzunehmen, die Sie auch durchführen können.",
                "Fokussieren Sie sich auf Stoßzeiten (7-9 Uhr, 17-19 Uhr) um Ihren Verdienst zu maximieren.",
            ],
        }
    }

    pub fn trips_label(&self) -> String {
        format_count(u64::from(self.metrics.total_trips))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalFieldView {
    pub field: PersonalField,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalTab {
    pub data: PersonalData,
    pub fields: Vec<PersonalFieldView>,
    pub privacy_notice: &'static str,
}

impl PersonalTab {
    pub fn new(data: PersonalData) -> Self {
        let fields = PersonalField::ordered()
            .into_iter()
            .map(|field| {
                let value = match field {
                    PersonalField::FirstName => data.first_name.clone(),
                    PersonalField::LastName => data.last_name.clone(),
                    PersonalField::DateOfBirth => format_date(data.date_of_birth),
                    PersonalField::Address => data.address.clone(),
                    PersonalField::PostalCode => data.postal_code.clone(),
                    PersonalField::City => data.city.clone(),
                    PersonalField::Country => data.country.clone(),
                    PersonalField::EmergencyContact => data.emergency_contact.clone(),
                    PersonalField::EmergencyPhone => data.emergency_phone.clone(),
                };
                PersonalFieldView {
                    field,
                    label: field.label(),
                    value,
                }
            })
            .collect();

        Self {
            data,
            fields,
            privacy_notice: "Alle persönlichen Daten werden gemäß DSGVO verarbeitet und gespeichert. Änderungen werden protokolliert und können nur von autorisierten Personen vorgenommen werden.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceState {
    Due,
    Completed,
}

/// One entry of the fixed maintenance schedule shown under the asset list.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceItem {
    pub state: MaintenanceState,
    pub title: &'static str,
    pub detail: &'static str,
    /// Call to action for due items, relative time for completed ones.
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetsTab {
    pub summary: AssetSummary,
    pub assets: Vec<AssetView>,
    pub maintenance: Vec<MaintenanceItem>,
}

impl AssetsTab {
    pub fn new(assets: &[Asset]) -> Self {
        Self {
            summary: AssetSummary::from_assets(assets),
            assets: assets.iter().map(AssetView::from).collect(),
            maintenance: vec![
                MaintenanceItem {
                    state: MaintenanceState::Due,
                    title: "Mercedes Sprinter - Inspektion fällig",
                    detail: "Nächste Inspektion in 2 Wochen",
                    note: "Termin planen",
                },
                MaintenanceItem {
                    state: MaintenanceState::Completed,
                    title: "GPS Tracker - Wartung abgeschlossen",
                    detail: "Software-Update erfolgreich installiert",
                    note: "Vor 3 Tagen",
                },
            ],
        }
    }

    pub fn due_maintenance(&self) -> impl Iterator<Item = &MaintenanceItem> {
        self.maintenance
            .iter()
            .filter(|item| item.state == MaintenanceState::Due)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentsTab {
    pub summary: DocumentSummary,
    pub documents: Vec<DocumentView>,
    pub missing: Vec<&'static str>,
    pub alerts: Vec<DocumentAlert>,
    pub alert_messages: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
}

impl DocumentsTab {
    pub fn new(documents: &[Document], now: DateTime<Utc>, window: ExpiryWindow) -> Self {
        let summary = DocumentSummary::from_documents(documents, now, window);
        let missing = missing_documents(&REQUIRED_DOCUMENT_TYPES, documents);
        let alerts = document_alerts(&summary, &missing, window);
        let alert_messages = alerts.iter().map(DocumentAlert::message).collect();

        Self {
            summary,
            documents: documents
                .iter()
                .map(|document| {
                    DocumentView::new(document, window.is_expiring_soon(document.expires_on, now))
                })
                .collect(),
            checklist: document_checklist(documents, now, window),
            missing,
            alerts,
            alert_messages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformOffer {
    pub name: &'static str,
    pub description: &'static str,
    pub connected: bool,
}

const PLATFORM_CATALOGUE: [(&str, &str, bool); 5] = [
    ("Uber", "Ride-hailing service", true),
    ("Bolt", "European ride-hailing", true),
    ("FREE NOW", "Taxi and ride service", true),
    ("Lyft", "US ride-sharing", false),
    ("DiDi", "Global mobility platform", false),
];

/// Known platforms, flagged when the driver already has an account there.
/// Only platforms marked linkable can ever show as connected.
pub fn platform_catalogue(accounts: &[PlatformAccount]) -> Vec<PlatformOffer> {
    PLATFORM_CATALOGUE
        .iter()
        .map(|&(name, description, linkable)| PlatformOffer {
            name,
            description,
            connected: linkable && accounts.iter().any(|account| account.platform == name),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformsTab {
    pub summary: AccountSummary,
    pub accounts: Vec<AccountView>,
    pub catalogue: Vec<PlatformOffer>,
}

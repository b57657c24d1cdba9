use crate::infra::{parse_instant, sample_desk, SampleDesk};
use chrono::{DateTime, Utc};
use clap::Args;
use driver_hub::config::AppConfig;
use driver_hub::drivers::domain::{DriverStatus, HistoryKind};
use driver_hub::drivers::profile::{
    AssetsTab, DocumentsTab, MaintenanceState, OverviewTab, PerformanceTab, PersonalTab,
    PlatformsTab,
};
use driver_hub::drivers::{
    DateRange, DriverDirectory, DriverId, DriverQuery, HistoryQuery, PersonalDataDraft,
    PersonalField, ProfileHeader, ProfileTab, RosterView, Selection, TabContent, TimelineView,
};
use driver_hub::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Case-insensitive match on name, email or license number
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// all, active, inactive or suspended
    #[arg(long, default_value = "all")]
    pub(crate) status: Selection<DriverStatus>,
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    pub(crate) id: String,
    /// overview, performance, personal, assets, documents, platforms or history
    #[arg(long, default_value = "overview")]
    pub(crate) tab: ProfileTab,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    pub(crate) id: String,
    /// Case-insensitive match on description or details
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// all, trip, payment, document or status_change
    #[arg(long = "type", default_value = "all")]
    pub(crate) kind: Selection<HistoryKind>,
    /// all, today, week or month
    #[arg(long, default_value = "all")]
    pub(crate) range: DateRange,
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print CSV instead of the grouped timeline
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
}

fn desk() -> Result<Arc<SampleDesk>, AppError> {
    let config = AppConfig::load()?;
    Ok(sample_desk(&config.documents))
}

pub(crate) fn run_driver_list(args: ListArgs) -> Result<(), AppError> {
    let query = DriverQuery::new(args.search.unwrap_or_default(), args.status);
    let view = desk()?.roster(query);
    render_roster(&view);
    Ok(())
}

pub(crate) fn run_driver_profile(args: ProfileArgs) -> Result<(), AppError> {
    let desk = desk()?;
    let id = DriverId::new(args.id);
    let now = args.now.unwrap_or_else(Utc::now);

    let header = desk.header(&id)?;
    render_header(&header);
    let content = desk.tab(&id, args.tab, HistoryQuery::default(), now)?;
    render_tab(&content);
    Ok(())
}

pub(crate) fn run_driver_history(args: HistoryArgs) -> Result<(), AppError> {
    let desk = desk()?;
    let id = DriverId::new(args.id);
    let now = args.now.unwrap_or_else(Utc::now);
    let query = HistoryQuery::new(args.search.unwrap_or_default(), args.kind, args.range);

    if args.csv {
        print!("{}", desk.export_history(&id, &query, now)?);
    } else {
        render_timeline(&desk.timeline(&id, query, now)?);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let desk = desk()?;
    let now = args.now.unwrap_or_else(Utc::now);

    println!("Driver hub demo");
    let roster = desk.roster(DriverQuery::default());
    render_roster(&roster);

    let Some(first) = roster.drivers.first() else {
        return Ok(());
    };
    let id = DriverId::new(first.id.clone());

    println!();
    render_header(&desk.header(&id)?);
    for tab in ProfileTab::ordered() {
        let content = desk.tab(&id, tab, HistoryQuery::default(), now)?;
        println!("\n== {} ==", tab.label());
        render_tab(&content);
    }

    println!("\nEditing personal data (draft, not saved)");
    let personal = desk.directory().personal_data(&id)?;
    let mut draft = PersonalDataDraft::begin(&personal);
    draft
        .set(PersonalField::City, "Hamburg")?
        .set(PersonalField::PostalCode, "20095")?;
    for field in draft.changed_fields() {
        println!("  - {} geändert", field.label());
    }
    let edited = draft.commit();
    println!(
        "  Entwurf: {} {}, {} {}",
        edited.first_name, edited.last_name, edited.postal_code, edited.city
    );
    println!("  Gespeichert bleibt: {} {}", personal.postal_code, personal.city);

    println!("\nHistory export");
    print!("{}", desk.export_history(&id, &HistoryQuery::default(), now)?);
    Ok(())
}

pub(crate) fn render_roster(view: &RosterView) {
    println!("{}", view.headline);
    let counts: Vec<String> = view
        .summary
        .by_status
        .counts
        .iter()
        .map(|entry| format!("{} {}", entry.count, entry.label))
        .collect();
    println!("  {}", counts.join(" | "));

    if let Some(message) = view.empty_message {
        println!("  {message}");
        return;
    }
    for driver in &view.drivers {
        println!(
            "  [{}] {} ({}) {} | {} | ★ {:.1} | {} Fahrten | {}",
            driver.id,
            driver.name,
            driver.initials,
            driver.status_label,
            driver.vehicle_type,
            driver.rating,
            driver.trips_label,
            driver.earnings_label
        );
    }
}

pub(crate) fn render_header(header: &ProfileHeader) {
    let driver = &header.driver;
    println!("{} ({})", driver.name, driver.status_label);
    println!("  {} | {}", driver.email, driver.phone);
    println!(
        "  Führerschein {} | {} | Dabei seit {}",
        driver.license_number, driver.vehicle_type, header.joined_long
    );
    let tabs: Vec<&str> = header.tabs.iter().map(|link| link.label).collect();
    println!("  Tabs: {}", tabs.join(" · "));
}

pub(crate) fn render_tab(content: &TabContent) {
    match content {
        TabContent::Overview(tab) => render_overview(tab),
        TabContent::Performance(tab) => render_performance(tab),
        TabContent::Personal(tab) => render_personal(tab),
        TabContent::Assets(tab) => render_assets(tab),
        TabContent::Documents(tab) => render_documents(tab),
        TabContent::Platforms(tab) => render_platforms(tab),
        TabContent::History(view) => render_timeline(view),
    }
}

fn render_overview(tab: &OverviewTab) {
    let weekly = &tab.weekly;
    println!(
        "Diese Woche: {} Fahrten ({:+}%) | {} ({:+}%) | {} Std. ({:+}%) | ★ {:.1}",
        weekly.trips,
        weekly.trips_change_pct,
        weekly.earnings_label,
        weekly.earnings_change_pct,
        weekly.hours,
        weekly.hours_change_pct,
        weekly.average_rating
    );
    println!("Letzte Aktivitäten:");
    for item in &tab.recent_activity {
        println!("  - {} ({})", item.description, item.time);
    }
    for notice in &tab.notices {
        println!("  ! {}", notice.message);
    }
}

fn render_performance(tab: &PerformanceTab) {
    println!(
        "{} Fahrten | {} gesamt | {} pro Fahrt | {}% pünktlich | {}% zufrieden",
        tab.trips_label(),
        tab.earnings_label,
        tab.earnings_per_trip_label,
        tab.metrics.on_time_pct,
        tab.metrics.customer_satisfaction_pct
    );
    for goal in &tab.goals {
        let marker = if goal.achieved { "✓" } else { " " };
        println!(
            "  [{marker}] {}: {} / {} {} ({:.0}%)",
            goal.title, goal.current, goal.target, goal.unit, goal.progress_pct
        );
    }
    let week: Vec<String> = tab
        .weekly
        .iter()
        .map(|day| format!("{} {}", day.day, day.trips))
        .collect();
    println!("  Woche: {}", week.join(", "));
    for achievement in &tab.achievements {
        println!("  * {} ({})", achievement.title, achievement.achieved_label);
    }
}

fn render_personal(tab: &PersonalTab) {
    for field in &tab.fields {
        println!("  {}: {}", field.label, field.value);
    }
}

fn render_assets(tab: &AssetsTab) {
    println!(
        "{} Assets | {} aktiv | {} in Wartung | {} außer Betrieb",
        tab.summary.total, tab.summary.active, tab.summary.maintenance, tab.summary.retired
    );
    for asset in &tab.assets {
        println!(
            "  - {} {} ({}) {} | {} | seit {}",
            asset.kind_label,
            asset.name,
            asset.model,
            asset.serial_number,
            asset.status_label,
            asset.assigned_label
        );
    }
    println!("Wartungsplan:");
    for item in &tab.maintenance {
        let marker = match item.state {
            MaintenanceState::Due => "!",
            MaintenanceState::Completed => "✓",
        };
        println!("  {marker} {} ({}) · {}", item.title, item.detail, item.note);
    }
}

fn render_documents(tab: &DocumentsTab) {
    println!(
        "{} Dokumente | {} gültig | {} abgelaufen | {} ausstehend | {} laufen bald ab",
        tab.summary.total,
        tab.summary.valid,
        tab.summary.expired,
        tab.summary.pending,
        tab.summary.expiring_soon
    );
    for document in &tab.documents {
        let expires = document.expires_label.as_deref().unwrap_or("-");
        let soon = if document.expiring_soon { " (läuft bald ab)" } else { "" };
        println!(
            "  - {}: {} | {} | gültig bis {expires}{soon}",
            document.document_type, document.name, document.status_label
        );
    }
    for message in &tab.alert_messages {
        println!("  ! {message}");
    }
}

fn render_platforms(tab: &PlatformsTab) {
    println!(
        "{} Konten | {} aktiv | ★ {:.1} im Schnitt",
        tab.summary.total, tab.summary.active, tab.summary.average_rating
    );
    for account in &tab.accounts {
        println!(
            "  [{}] {} @{} | {} | ★ {:.1}",
            account.badge, account.platform, account.username, account.status_label, account.rating
        );
    }
    let available: Vec<&str> = tab
        .catalogue
        .iter()
        .filter(|offer| !offer.connected)
        .map(|offer| offer.name)
        .collect();
    println!("  Verfügbar: {}", available.join(", "));
}

pub(crate) fn render_timeline(view: &TimelineView) {
    println!(
        "{} von {} Einträgen | {} Fahrten | {} Zahlungen | {} Dokumente | {} Statusänderungen",
        view.shown,
        view.summary.total,
        view.summary.trips,
        view.summary.payments,
        view.summary.documents,
        view.summary.status_changes
    );
    if let Some(message) = view.empty_message {
        println!("  {message}");
        return;
    }
    for group in &view.groups {
        println!("  {}", group.key);
        for entry in &group.entries {
            let details = entry
                .details
                .as_deref()
                .map(|details| format!(" ({details})"))
                .unwrap_or_default();
            println!(
                "    {} [{}] {}{} · {}",
                entry.time, entry.kind_label, entry.description, details, entry.relative
            );
        }
    }
}

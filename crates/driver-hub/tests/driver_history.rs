use chrono::{DateTime, Duration, TimeZone, Utc};
use driver_hub::drivers::domain::{HistoryEntry, HistoryKind};
use driver_hub::drivers::provider::sample_history;
use driver_hub::drivers::timeline::{group_by_date, RelativeTime};
use driver_hub::drivers::{
    DateRange, DriverDeskService, DriverId, HistoryQuery, SampleDirectory, Selection,
};
use std::sync::Arc;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

#[test]
fn relative_buckets_follow_hour_thresholds() {
    let now = at(20, 12);
    let ago = |minutes: i64| now - Duration::minutes(minutes);

    assert_eq!(RelativeTime::between(ago(30), now), RelativeTime::JustNow);
    assert_eq!(RelativeTime::between(ago(5 * 60), now), RelativeTime::HoursAgo(5));
    assert_eq!(RelativeTime::between(ago(30 * 60), now), RelativeTime::Yesterday);
    assert_eq!(RelativeTime::between(ago(100 * 60), now), RelativeTime::DaysAgo(4));
    assert_eq!(
        RelativeTime::between(ago(200 * 60), now),
        RelativeTime::On(ago(200 * 60).date_naive())
    );
}

#[test]
fn grouping_preserves_every_entry() {
    let mut entries = sample_history();
    entries.extend(sample_history().into_iter().map(|mut entry| {
        entry.id = format!("{}b", entry.id);
        entry.at += Duration::hours(3);
        entry
    }));

    let groups = group_by_date(&entries);
    let grouped: usize = groups.iter().map(|group| group.entries.len()).sum();
    assert_eq!(grouped, entries.len());
    assert!(groups.windows(2).all(|pair| pair[0].day > pair[1].day));
    assert!(groups
        .iter()
        .all(|group| group.entries.windows(2).all(|pair| pair[0].at >= pair[1].at)));
}

#[test]
fn details_are_searched_but_optional() {
    let mut entries = sample_history();
    entries.push(HistoryEntry {
        id: "5".to_string(),
        at: at(16, 8),
        kind: HistoryKind::Trip,
        description: "Fahrt storniert".to_string(),
        details: None,
    });

    let query = HistoryQuery::new("tegel", Selection::All, DateRange::All);
    let matched = query.apply(&entries, at(16, 12));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "1");

    let query = HistoryQuery::new("fahrt", Selection::Only(HistoryKind::Trip), DateRange::All);
    assert_eq!(query.apply(&entries, at(16, 12)).len(), 2);
}

#[test]
fn timeline_view_groups_filtered_history() {
    let desk = DriverDeskService::new(Arc::new(SampleDirectory::new()));
    let query = HistoryQuery::new("", Selection::All, DateRange::Week);
    let view = desk
        .timeline(&DriverId::new("4"), query, at(19, 12))
        .expect("known driver");

    let keys: Vec<_> = view.groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["15.1.2024", "14.1.2024", "13.1.2024"]);
    assert_eq!(view.shown, 3);
    assert_eq!(view.summary.total, 4);
    assert_eq!(view.groups[0].entries[0].relative, "Vor 3 Tagen");
    assert_eq!(view.groups[0].entries[0].time, "14:32");
}

#[test]
fn empty_timeline_carries_message() {
    let desk = DriverDeskService::new(Arc::new(SampleDirectory::new()));
    let query = HistoryQuery::new("", Selection::All, DateRange::Today);
    let view = desk
        .timeline(&DriverId::new("1"), query, at(20, 12))
        .expect("known driver");
    assert!(view.groups.is_empty());
    assert_eq!(view.empty_message, Some("Keine Aktivitäten gefunden."));
}

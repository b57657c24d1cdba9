use super::domain::{Discriminant, DriverError};
use super::format::format_time;
use super::timeline::DayGroup;
use std::io::Write;

pub const EXPORT_HEADER: [&str; 6] = ["id", "date", "time", "type", "description", "details"];

/// Writes grouped history as CSV, one row per entry in timeline order.
///
/// Dates are ISO `YYYY-MM-DD` and types use their wire names so the file
/// re-imports cleanly; missing details become an empty cell.
pub fn write_history_csv<W: Write>(writer: W, groups: &[DayGroup]) -> Result<W, DriverError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;

    for group in groups {
        let date = group.day.format("%Y-%m-%d").to_string();
        for entry in &group.entries {
            csv_writer.write_record([
                entry.id.as_str(),
                date.as_str(),
                format_time(entry.at).as_str(),
                entry.kind.as_str(),
                entry.description.as_str(),
                entry.details.as_deref().unwrap_or_default(),
            ])?;
        }
    }

    csv_writer
        .into_inner()
        .map_err(|err| DriverError::Export(csv::Error::from(err.into_error())))
}

pub fn history_csv(groups: &[DayGroup]) -> Result<String, DriverError> {
    let bytes = write_history_csv(Vec::new(), groups)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::provider::sample_history;
    use crate::drivers::timeline::group_by_date;

    #[test]
    fn exports_newest_first_with_header() {
        let csv = history_csv(&group_by_date(&sample_history())).expect("export succeeds");
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "id,date,time,type,description,details");
        assert_eq!(
            lines[1],
            "1,2024-01-15,14:32,trip,Fahrt abgeschlossen,Berlin Hauptbahnhof → Flughafen Tegel"
        );
        assert_eq!(
            lines[4],
            "4,2024-01-12,11:20,status_change,Status geändert,Von inaktiv zu aktiv"
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn empty_timeline_exports_only_the_header() {
        let csv = history_csv(&[]).expect("export succeeds");
        assert_eq!(csv, "id,date,time,type,description,details\n");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut history = sample_history();
        history.truncate(1);
        history[0].details = Some("Berlin, Mitte".to_string());
        let csv = history_csv(&group_by_date(&history)).expect("export succeeds");
        assert!(csv.contains("\"Berlin, Mitte\""));
    }
}

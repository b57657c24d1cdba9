use chrono::{DateTime, Utc};
use driver_hub::config::DocumentConfig;
use driver_hub::drivers::{self, DriverDeskService, SampleDirectory};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SampleDesk = DriverDeskService<SampleDirectory>;

pub(crate) fn sample_desk(documents: &DocumentConfig) -> Arc<SampleDesk> {
    Arc::new(DriverDeskService::with_expiry_window(
        Arc::new(SampleDirectory::new()),
        documents.expiry_window(),
    ))
}

/// clap adapter over the library parser so CLI and HTTP accept the same forms.
pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    drivers::parse_instant(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn instants_accept_offsets_and_bare_dates() {
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 15, 17, 0, 0)
            .single()
            .expect("valid instant");
        assert_eq!(parse_instant("2024-01-15T18:00:00+01:00"), Ok(expected));

        let midnight = Utc
            .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
            .single()
            .expect("valid instant");
        assert_eq!(parse_instant(" 2024-01-15 "), Ok(midnight));
        let err = parse_instant("15.1.2024").expect_err("german date is rejected");
        assert!(err.contains("RFC 3339 or YYYY-MM-DD"));
    }
}

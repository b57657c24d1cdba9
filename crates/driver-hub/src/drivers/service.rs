use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::documents::ExpiryWindow;
use super::domain::{DriverError, DriverId};
use super::export::history_csv;
use super::filter::{DriverQuery, HistoryQuery};
use super::profile::{build_tab, ProfileHeader, ProfileTab, TabContent, TabContext};
use super::provider::DriverDirectory;
use super::timeline::{group_by_date, DayGroup};
use super::views::{RosterView, TimelineView};

/// Read-side facade over a driver directory for the CLI and HTTP surfaces.
pub struct DriverDeskService<D: ?Sized> {
    expiry: ExpiryWindow,
    directory: Arc<D>,
}

impl<D> DriverDeskService<D>
where
    D: DriverDirectory + ?Sized,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_expiry_window(directory, ExpiryWindow::default())
    }

    pub fn with_expiry_window(directory: Arc<D>, expiry: ExpiryWindow) -> Self {
        Self { expiry, directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn expiry_window(&self) -> ExpiryWindow {
        self.expiry
    }

    pub fn roster(&self, query: DriverQuery) -> RosterView {
        let all = self.directory.drivers();
        let matched = query.apply(&all);
        debug!(
            search = %query.search,
            status = %query.status,
            matched = matched.len(),
            total = all.len(),
            "filtered driver roster"
        );
        RosterView::new(query, &all, &matched)
    }

    pub fn header(&self, id: &DriverId) -> Result<ProfileHeader, DriverError> {
        let driver = self.directory.driver(id)?;
        Ok(ProfileHeader::new(&driver))
    }

    pub fn tab(
        &self,
        id: &DriverId,
        tab: ProfileTab,
        history: HistoryQuery,
        now: DateTime<Utc>,
    ) -> Result<TabContent, DriverError> {
        let context = TabContext {
            now,
            expiry: self.expiry,
            history,
        };
        debug!(driver_id = %id, tab = tab.slug(), "building profile tab");
        build_tab(self.directory.as_ref(), id, tab, &context)
    }

    /// Filtered history grouped by day, newest first.
    pub fn history_groups(
        &self,
        id: &DriverId,
        query: &HistoryQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<DayGroup>, DriverError> {
        let history = self.directory.history(id)?;
        let matched = query.apply(&history, now);
        debug!(
            driver_id = %id,
            kind = %query.kind,
            range = query.range.as_str(),
            matched = matched.len(),
            "filtered driver history"
        );
        Ok(group_by_date(&matched))
    }

    pub fn timeline(
        &self,
        id: &DriverId,
        query: HistoryQuery,
        now: DateTime<Utc>,
    ) -> Result<TimelineView, DriverError> {
        let history = self.directory.history(id)?;
        let groups = group_by_date(&query.apply(&history, now));
        Ok(TimelineView::new(query, &history, &groups, now))
    }

    pub fn export_history(
        &self,
        id: &DriverId,
        query: &HistoryQuery,
        now: DateTime<Utc>,
    ) -> Result<String, DriverError> {
        let groups = self.history_groups(id, query, now)?;
        let csv = history_csv(&groups)?;
        info!(driver_id = %id, bytes = csv.len(), "exported driver history");
        Ok(csv)
    }
}

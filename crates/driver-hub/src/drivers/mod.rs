//! Driver management: roster search, profile tabs, documents and history.

pub mod documents;
pub mod domain;
pub mod draft;
pub mod export;
pub mod filter;
pub mod format;
pub mod profile;
pub mod provider;
pub mod router;
mod service;
pub mod summary;
pub mod timeline;
pub mod views;

pub use documents::{ExpiryWindow, REQUIRED_DOCUMENT_TYPES};
pub use domain::{Discriminant, Driver, DriverError, DriverId};
pub use draft::{PersonalDataDraft, PersonalField};
pub use filter::{parse_date, parse_instant, DateRange, DriverQuery, HistoryQuery, Selection};
pub use profile::{ProfileHeader, ProfileTab, TabContent};
pub use provider::{DriverDirectory, SampleDirectory};
pub use router::driver_router;
pub use service::DriverDeskService;
pub use views::{RosterView, TimelineView};

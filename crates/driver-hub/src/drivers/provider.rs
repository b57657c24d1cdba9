use super::domain::{
    AccountStatus, Asset, AssetKind, AssetStatus, Document, DocumentStatus, Driver, DriverError,
    DriverId, DriverStatus, HistoryEntry, HistoryKind, PerformanceMetrics, PersonalData,
    PlatformAccount,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Read-only source of driver records.
///
/// Every by-id lookup fails with [`DriverError::NotFound`] when the id is not
/// part of [`DriverDirectory::drivers`].
pub trait DriverDirectory: Send + Sync {
    fn drivers(&self) -> Vec<Driver>;

    fn driver(&self, id: &DriverId) -> Result<Driver, DriverError> {
        self.drivers()
            .into_iter()
            .find(|driver| &driver.id == id)
            .ok_or_else(|| DriverError::NotFound(id.clone()))
    }

    fn personal_data(&self, id: &DriverId) -> Result<PersonalData, DriverError>;
    fn performance_metrics(&self, id: &DriverId) -> Result<PerformanceMetrics, DriverError>;
    fn assets(&self, id: &DriverId) -> Result<Vec<Asset>, DriverError>;
    fn documents(&self, id: &DriverId) -> Result<Vec<Document>, DriverError>;
    fn platform_accounts(&self, id: &DriverId) -> Result<Vec<PlatformAccount>, DriverError>;
    fn history(&self, id: &DriverId) -> Result<Vec<HistoryEntry>, DriverError>;
}

/// Fixed sample roster of five drivers.
///
/// Assets, documents, platform accounts and history are the same sample set for
/// every known driver.
#[derive(Debug, Clone)]
pub struct SampleDirectory {
    drivers: Vec<Driver>,
}

impl Default for SampleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleDirectory {
    pub fn new() -> Self {
        Self {
            drivers: sample_drivers(),
        }
    }

    pub fn with_drivers(drivers: Vec<Driver>) -> Self {
        Self { drivers }
    }

    fn require(&self, id: &DriverId) -> Result<&Driver, DriverError> {
        self.drivers
            .iter()
            .find(|driver| &driver.id == id)
            .ok_or_else(|| DriverError::NotFound(id.clone()))
    }
}

impl DriverDirectory for SampleDirectory {
    fn drivers(&self) -> Vec<Driver> {
        self.drivers.clone()
    }

    fn driver(&self, id: &DriverId) -> Result<Driver, DriverError> {
        self.require(id).cloned()
    }

    fn personal_data(&self, id: &DriverId) -> Result<PersonalData, DriverError> {
        let driver = self.require(id)?;
        let (first_name, last_name) = match driver.name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (driver.name.clone(), String::new()),
        };

        Ok(PersonalData {
            first_name,
            last_name,
            date_of_birth: date(1985, 6, 15),
            address: "Musterstraße 123".to_string(),
            city: "Berlin".to_string(),
            postal_code: "10115".to_string(),
            country: "Deutschland".to_string(),
            emergency_contact: "Maria Mustermann".to_string(),
            emergency_phone: "+49 123 456 7891".to_string(),
        })
    }

    fn performance_metrics(&self, id: &DriverId) -> Result<PerformanceMetrics, DriverError> {
        let driver = self.require(id)?;
        Ok(derive_metrics(driver))
    }

    fn assets(&self, id: &DriverId) -> Result<Vec<Asset>, DriverError> {
        self.require(id)?;
        Ok(sample_assets())
    }

    fn documents(&self, id: &DriverId) -> Result<Vec<Document>, DriverError> {
        self.require(id)?;
        Ok(sample_documents())
    }

    fn platform_accounts(&self, id: &DriverId) -> Result<Vec<PlatformAccount>, DriverError> {
        self.require(id)?;
        Ok(sample_accounts())
    }

    fn history(&self, id: &DriverId) -> Result<Vec<HistoryEntry>, DriverError> {
        self.require(id)?;
        Ok(sample_history())
    }
}

/// Completed/cancelled splits are 95/5 of the trip count. The two percentages
/// are synthesized from the trip count so repeated lookups agree: on-time lands
/// in 80..=99 and satisfaction in 85..=99.
pub fn derive_metrics(driver: &Driver) -> PerformanceMetrics {
    let trips = driver.total_trips;
    PerformanceMetrics {
        rating: driver.rating,
        total_trips: trips,
        completed_trips: (f64::from(trips) * 0.95).floor() as u32,
        cancelled_trips: (f64::from(trips) * 0.05).floor() as u32,
        total_earnings: driver.total_earnings,
        average_rating: driver.rating,
        on_time_pct: 80 + (trips % 20) as u8,
        customer_satisfaction_pct: 85 + (trips % 15) as u8,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn instant(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[allow(clippy::too_many_arguments)]
fn driver(
    id: &str,
    name: &str,
    phone: &str,
    status: DriverStatus,
    license_number: &str,
    vehicle_type: &str,
    join_date: NaiveDate,
    rating: f32,
    total_trips: u32,
    total_earnings: f64,
    avatar_photo: &str,
) -> Driver {
    let email = format!("{}@email.com", name.to_lowercase().replace(' ', "."));
    Driver {
        id: DriverId::new(id),
        name: name.to_string(),
        email,
        phone: phone.to_string(),
        status,
        license_number: license_number.to_string(),
        vehicle_type: vehicle_type.to_string(),
        join_date,
        rating,
        total_trips,
        total_earnings,
        avatar: Some(format!(
            "https://images.unsplash.com/photo-{avatar_photo}?w=150&h=150&fit=crop&crop=face"
        )),
    }
}

pub fn sample_drivers() -> Vec<Driver> {
    vec![
        driver(
            "1",
            "Max Mustermann",
            "+49 123 456 7890",
            DriverStatus::Active,
            "B123456789",
            "PKW",
            date(2023, 1, 15),
            4.8,
            1250,
            15750.50,
            "1472099645785-5658abf4ff4e",
        ),
        driver(
            "2",
            "Anna Schmidt",
            "+49 987 654 3210",
            DriverStatus::Active,
            "B987654321",
            "Transporter",
            date(2022, 11, 8),
            4.9,
            2100,
            28900.75,
            "1494790108755-2616b9c5e8e1",
        ),
        driver(
            "3",
            "Thomas Weber",
            "+49 555 123 4567",
            DriverStatus::Inactive,
            "B555123456",
            "LKW",
            date(2023, 3, 22),
            4.6,
            890,
            12340.25,
            "1507003211169-0a1dd7228f2d",
        ),
        driver(
            "4",
            "Sarah Fischer",
            "+49 777 888 9999",
            DriverStatus::Active,
            "B777888999",
            "PKW",
            date(2022, 8, 14),
            4.7,
            1680,
            21450.80,
            "1438761681033-6461ffad8d80",
        ),
        driver(
            "5",
            "Michael Bauer",
            "+49 333 444 5555",
            DriverStatus::Suspended,
            "B333444555",
            "Transporter",
            date(2023, 5, 10),
            4.2,
            450,
            6780.90,
            "1500648767791-00dcc994a43e",
        ),
    ]
}

pub fn sample_assets() -> Vec<Asset> {
    let assigned_on = date(2023, 1, 15);
    vec![
        Asset {
            id: "1".to_string(),
            kind: AssetKind::Vehicle,
            name: "Mercedes Sprinter".to_string(),
            model: "2022".to_string(),
            serial_number: "WDB9066331234567".to_string(),
            status: AssetStatus::Active,
            assigned_on,
        },
        Asset {
            id: "2".to_string(),
            kind: AssetKind::Device,
            name: "GPS Tracker".to_string(),
            model: "TomTom GO".to_string(),
            serial_number: "TT123456789".to_string(),
            status: AssetStatus::Active,
            assigned_on,
        },
        Asset {
            id: "3".to_string(),
            kind: AssetKind::Equipment,
            name: "Sicherheitsweste".to_string(),
            model: "Hi-Vis".to_string(),
            serial_number: "HV001234".to_string(),
            status: AssetStatus::Active,
            assigned_on,
        },
    ]
}

pub fn sample_documents() -> Vec<Document> {
    let uploaded_on = date(2023, 1, 15);
    vec![
        Document {
            id: "1".to_string(),
            kind: "Führerschein".to_string(),
            name: "Führerschein Klasse B".to_string(),
            uploaded_on,
            expires_on: Some(date(2033, 1, 15)),
            status: DocumentStatus::Valid,
            file_url: "#".to_string(),
        },
        Document {
            id: "2".to_string(),
            kind: "Personalausweis".to_string(),
            name: "Personalausweis".to_string(),
            uploaded_on,
            expires_on: Some(date(2028, 1, 15)),
            status: DocumentStatus::Valid,
            file_url: "#".to_string(),
        },
        Document {
            id: "3".to_string(),
            kind: "Gesundheitszeugnis".to_string(),
            name: "Ärztliches Attest".to_string(),
            uploaded_on,
            expires_on: Some(date(2024, 1, 15)),
            status: DocumentStatus::Expired,
            file_url: "#".to_string(),
        },
    ]
}

pub fn sample_accounts() -> Vec<PlatformAccount> {
    vec![
        PlatformAccount {
            id: "1".to_string(),
            platform: "Uber".to_string(),
            username: "max.mustermann".to_string(),
            status: AccountStatus::Active,
            joined_on: date(2023, 1, 15),
            rating: 4.8,
        },
        PlatformAccount {
            id: "2".to_string(),
            platform: "Bolt".to_string(),
            username: "max_m_driver".to_string(),
            status: AccountStatus::Active,
            joined_on: date(2023, 2, 1),
            rating: 4.7,
        },
        PlatformAccount {
            id: "3".to_string(),
            platform: "FREE NOW".to_string(),
            username: "maxmustermann123".to_string(),
            status: AccountStatus::Inactive,
            joined_on: date(2022, 12, 15),
            rating: 4.9,
        },
    ]
}

pub fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: "1".to_string(),
            at: instant(2024, 1, 15, 14, 32),
            kind: HistoryKind::Trip,
            description: "Fahrt abgeschlossen".to_string(),
            details: Some("Berlin Hauptbahnhof → Flughafen Tegel".to_string()),
        },
        HistoryEntry {
            id: "2".to_string(),
            at: instant(2024, 1, 14, 9, 15),
            kind: HistoryKind::Payment,
            description: "Auszahlung erhalten".to_string(),
            details: Some("€125.50".to_string()),
        },
        HistoryEntry {
            id: "3".to_string(),
            at: instant(2024, 1, 13, 16, 45),
            kind: HistoryKind::Document,
            description: "Dokument hochgeladen".to_string(),
            details: Some("Führerschein erneuert".to_string()),
        },
        HistoryEntry {
            id: "4".to_string(),
            at: instant(2024, 1, 12, 11, 20),
            kind: HistoryKind::StatusChange,
            description: "Status geändert".to_string(),
            details: Some("Von inaktiv zu aktiv".to_string()),
        },
    ]
}

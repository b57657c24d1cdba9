use super::domain::{DriverError, PersonalData};
use super::filter::parse_date;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    FirstName,
    LastName,
    DateOfBirth,
    Address,
    PostalCode,
    City,
    Country,
    EmergencyContact,
    EmergencyPhone,
}

impl PersonalField {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::FirstName,
            Self::LastName,
            Self::DateOfBirth,
            Self::Address,
            Self::PostalCode,
            Self::City,
            Self::Country,
            Self::EmergencyContact,
            Self::EmergencyPhone,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "Vorname",
            Self::LastName => "Nachname",
            Self::DateOfBirth => "Geburtsdatum",
            Self::Address => "Adresse",
            Self::PostalCode => "Postleitzahl",
            Self::City => "Stadt",
            Self::Country => "Land",
            Self::EmergencyContact => "Notfallkontakt",
            Self::EmergencyPhone => "Notfalltelefon",
        }
    }
}

/// Caller-owned edit session over a copy of a driver's personal data.
///
/// The record handed to [`PersonalDataDraft::begin`] is never touched: `commit`
/// yields the edited copy and `discard` hands the untouched original back.
#[derive(Debug, Clone)]
pub struct PersonalDataDraft {
    original: PersonalData,
    draft: PersonalData,
}

impl PersonalDataDraft {
    pub fn begin(record: &PersonalData) -> Self {
        Self {
            original: record.clone(),
            draft: record.clone(),
        }
    }

    pub fn current(&self) -> &PersonalData {
        &self.draft
    }

    /// Sets one field from its form value. `DateOfBirth` must be `YYYY-MM-DD`;
    /// a value that does not parse leaves the draft unchanged.
    pub fn set(
        &mut self,
        field: PersonalField,
        value: impl Into<String>,
    ) -> Result<&mut Self, DriverError> {
        let value = value.into();
        let slot = match field {
            PersonalField::FirstName => &mut self.draft.first_name,
            PersonalField::LastName => &mut self.draft.last_name,
            PersonalField::Address => &mut self.draft.address,
            PersonalField::PostalCode => &mut self.draft.postal_code,
            PersonalField::City => &mut self.draft.city,
            PersonalField::Country => &mut self.draft.country,
            PersonalField::EmergencyContact => &mut self.draft.emergency_contact,
            PersonalField::EmergencyPhone => &mut self.draft.emergency_phone,
            PersonalField::DateOfBirth => {
                let date = parse_date(&value)?;
                return Ok(self.set_date_of_birth(date));
            }
        };
        *slot = value;
        Ok(self)
    }

    pub fn set_date_of_birth(&mut self, date: NaiveDate) -> &mut Self {
        self.draft.date_of_birth = date;
        self
    }

    pub fn changed_fields(&self) -> Vec<PersonalField> {
        let (before, after) = (&self.original, &self.draft);
        PersonalField::ordered()
            .into_iter()
            .filter(|field| match field {
                PersonalField::FirstName => before.first_name != after.first_name,
                PersonalField::LastName => before.last_name != after.last_name,
                PersonalField::DateOfBirth => before.date_of_birth != after.date_of_birth,
                PersonalField::Address => before.address != after.address,
                PersonalField::PostalCode => before.postal_code != after.postal_code,
                PersonalField::City => before.city != after.city,
                PersonalField::Country => before.country != after.country,
                PersonalField::EmergencyContact => {
                    before.emergency_contact != after.emergency_contact
                }
                PersonalField::EmergencyPhone => before.emergency_phone != after.emergency_phone,
            })
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.draft
    }

    pub fn commit(self) -> PersonalData {
        self.draft
    }

    pub fn discard(self) -> PersonalData {
        self.original
    }
}

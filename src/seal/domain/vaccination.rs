//! Proof-of-vaccination message body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proof-of-vaccination message carried by a seal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PovMessage {
    /// Unique vaccination certificate identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvci: Option<String>,
    /// The vaccinated person.
    #[serde(rename = "pid", default)]
    pub person_identification: PersonIdentification,
    /// Vaccination events in presentation order.
    #[serde(rename = "ve", default)]
    pub vaccination_events: Vec<VaccinationEvent>,
}

impl PovMessage {
    /// Creates a message with no vaccination events.
    #[must_use]
    pub fn new(uvci: impl Into<String>, person_identification: PersonIdentification) -> Self {
        Self {
            uvci: Some(uvci.into()),
            person_identification,
            vaccination_events: Vec::new(),
        }
    }

    /// Appends a vaccination event.
    #[must_use]
    pub fn with_event(mut self, event: VaccinationEvent) -> Self {
        self.vaccination_events.push(event);
        self
    }

    /// Total number of doses across every event.
    #[must_use]
    pub fn dose_count(&self) -> usize {
        self.vaccination_events
            .iter()
            .map(|event| event.vaccination_details.len())
            .sum()
    }

    /// Number of vaccination events.
    #[must_use]
    pub const fn event_count(&self) -> usize {
        self.vaccination_events.len()
    }
}

/// Sex of the holder as defined in ICAO Doc 9303-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Female.
    #[serde(rename = "F")]
    Female,
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Unspecified.
    #[serde(rename = "X")]
    Unspecified,
}

impl Sex {
    /// Returns the single-letter code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "F",
            Self::Male => "M",
            Self::Unspecified => "X",
        }
    }

    /// Every permitted code, in document order.
    #[must_use]
    pub fn codes() -> Vec<String> {
        [Self::Female, Self::Male, Self::Unspecified]
            .into_iter()
            .map(|sex| sex.as_str().to_owned())
            .collect()
    }
}

impl TryFrom<&str> for Sex {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "F" => Ok(Self::Female),
            "M" => Ok(Self::Male),
            "X" => Ok(Self::Unspecified),
            other => Err(other.to_owned()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identification of the vaccinated person.
///
/// `sex` is kept as the raw input so that an unknown code is reported by
/// validation rather than rejected while decoding; [`Sex`] is the typed view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonIdentification {
    /// Name, already truncated to the MRZ convention.
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Date of birth, full or partial ISO 8601.
    #[serde(rename = "dob", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Travel document number.
    #[serde(rename = "i", default, skip_serializing_if = "Option::is_none")]
    pub unique_identifier: Option<String>,
    /// Additional identifier such as a national ID.
    #[serde(rename = "ai", default, skip_serializing_if = "Option::is_none")]
    pub additional_identifier: Option<String>,
    /// Sex code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

impl PersonIdentification {
    /// Creates an identification with a name and sex.
    #[must_use]
    pub fn new(name: impl Into<String>, sex: Sex) -> Self {
        Self {
            name: Some(name.into()),
            sex: Some(sex.as_str().to_owned()),
            ..Self::default()
        }
    }

    /// Sets the date of birth.
    #[must_use]
    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// Sets the travel document number.
    #[must_use]
    pub fn with_unique_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.unique_identifier = Some(identifier.into());
        self
    }

    /// Sets the additional identifier.
    #[must_use]
    pub fn with_additional_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.additional_identifier = Some(identifier.into());
        self
    }

    /// Returns the parsed sex, if present and valid.
    #[must_use]
    pub fn parsed_sex(&self) -> Option<Sex> {
        self.sex
            .as_deref()
            .and_then(|code| Sex::try_from(code).ok())
    }
}

/// A vaccine course against one disease with its administered doses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaccinationEvent {
    /// Vaccine or prophylaxis code.
    #[serde(rename = "des", default, skip_serializing_if = "Option::is_none")]
    pub vaccine_or_prophylaxis: Option<String>,
    /// Vaccine brand name.
    #[serde(rename = "nam", default, skip_serializing_if = "Option::is_none")]
    pub vaccine_brand: Option<String>,
    /// Disease or agent targeted code.
    #[serde(rename = "dis", default, skip_serializing_if = "Option::is_none")]
    pub disease_or_agent_targeted: Option<String>,
    /// Administered doses.
    #[serde(rename = "vd", default)]
    pub vaccination_details: Vec<VaccinationDetails>,
}

impl VaccinationEvent {
    /// Creates an event with no doses.
    #[must_use]
    pub fn new(
        disease_or_agent_targeted: impl Into<String>,
        vaccine_or_prophylaxis: impl Into<String>,
        vaccine_brand: impl Into<String>,
    ) -> Self {
        Self {
            vaccine_or_prophylaxis: Some(vaccine_or_prophylaxis.into()),
            vaccine_brand: Some(vaccine_brand.into()),
            disease_or_agent_targeted: Some(disease_or_agent_targeted.into()),
            vaccination_details: Vec::new(),
        }
    }

    /// Appends a dose.
    #[must_use]
    pub fn with_dose(mut self, dose: VaccinationDetails) -> Self {
        self.vaccination_details.push(dose);
        self
    }

    /// Returns a copy of this event's metadata carrying the given doses.
    #[must_use]
    pub fn with_details(&self, vaccination_details: Vec<VaccinationDetails>) -> Self {
        Self {
            vaccine_or_prophylaxis: self.vaccine_or_prophylaxis.clone(),
            vaccine_brand: self.vaccine_brand.clone(),
            disease_or_agent_targeted: self.disease_or_agent_targeted.clone(),
            vaccination_details,
        }
    }
}

/// A single administered dose.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VaccinationDetails {
    /// Date the dose was administered.
    #[serde(rename = "dvc", default, skip_serializing_if = "Option::is_none")]
    pub date_of_vaccination: Option<String>,
    /// Dose sequence number within the event.
    #[serde(rename = "seq", default)]
    pub dose_number: i32,
    /// Three-letter code of the country of vaccination.
    #[serde(rename = "ctr", default, skip_serializing_if = "Option::is_none")]
    pub country_of_vaccination: Option<String>,
    /// Administering centre.
    #[serde(rename = "adm", default, skip_serializing_if = "Option::is_none")]
    pub administering_centre: Option<String>,
    /// Vaccine batch number.
    #[serde(rename = "lot", default, skip_serializing_if = "Option::is_none")]
    pub vaccine_batch_number: Option<String>,
    /// Due date of the next dose.
    #[serde(rename = "dvn", default, skip_serializing_if = "Option::is_none")]
    pub due_date_of_next_dose: Option<String>,
}

impl VaccinationDetails {
    /// Creates a dose record with every mandatory field set.
    #[must_use]
    pub fn new(
        date_of_vaccination: impl Into<String>,
        dose_number: i32,
        country_of_vaccination: impl Into<String>,
        administering_centre: impl Into<String>,
        vaccine_batch_number: impl Into<String>,
    ) -> Self {
        Self {
            date_of_vaccination: Some(date_of_vaccination.into()),
            dose_number,
            country_of_vaccination: Some(country_of_vaccination.into()),
            administering_centre: Some(administering_centre.into()),
            vaccine_batch_number: Some(vaccine_batch_number.into()),
            due_date_of_next_dose: None,
        }
    }

    /// Sets the due date of the next dose.
    #[must_use]
    pub fn with_due_date_of_next_dose(mut self, due: impl Into<String>) -> Self {
        self.due_date_of_next_dose = Some(due.into());
        self
    }
}

//! Shared fixtures and helpers for seal tests.

use crate::seal::{
    domain::{
        PersonIdentification, PovMessage, Sex, VaccinationDetails, VaccinationEvent, Vds,
        VdsHeader,
    },
    policy::ValidationPolicy,
    ports::VdsValidator,
    validation::PolicyValidator,
};
use rstest::fixture;

/// A dose with every mandatory field set.
pub fn dose(number: i32) -> VaccinationDetails {
    VaccinationDetails::new(
        "2021-03-03",
        number,
        "AUS",
        "General Practitioner",
        format!("LOT{number}"),
    )
}

/// An event for `disease` holding doses with the given numbers.
pub fn event_with_doses(disease: &str, numbers: &[i32]) -> VaccinationEvent {
    numbers.iter().fold(
        VaccinationEvent::new(disease, "XM68M6", "Comirnaty"),
        |event, number| event.with_dose(dose(*number)),
    )
}

/// A seal with the given events and a valid header and holder.
pub fn vds_with_events(events: Vec<VaccinationEvent>) -> Vds {
    let person =
        PersonIdentification::new("SMITH  JOHN", Sex::Male).with_date_of_birth("1980-01-31");
    let message = events
        .into_iter()
        .fold(PovMessage::new("U32870", person), PovMessage::with_event);
    Vds::new(VdsHeader::new("icao.vacc", "AUS"), message)
}

#[fixture]
pub fn valid_vds() -> Vds {
    vds_with_events(vec![event_with_doses("RA01", &[1, 2])])
}

#[fixture]
pub fn default_policy() -> ValidationPolicy {
    ValidationPolicy::default()
}

/// Validates with a policy, panicking if the validator itself fails.
pub fn messages_for(vds: &Vds, policy: ValidationPolicy) -> Vec<String> {
    PolicyValidator::with_policy(policy)
        .expect("test policy should be consistent")
        .validate(vds)
        .expect("validator should not fault")
}

/// Converts string literals to an owned allow-list.
pub fn allow_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

//! Vaccination event and dose validation.

use super::{Charset, FieldPath, IntRule, TextRule, Violations};
use crate::seal::{
    domain::{VaccinationDetails, VaccinationEvent},
    policy::{Optionality, ValidationPolicy},
    ports::ValidationResult,
};

/// Validates an event's metadata, then each of its doses.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_event(
    event: &VaccinationEvent,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(
        field.field("vaccine_or_prophylaxis"),
        event.vaccine_or_prophylaxis.as_deref(),
    )
    .required()
    .charset(Charset::Vds)
    .length(1, 6)
    .one_of(&policy.vaccines_or_prophylaxes)
    .check(violations)?;

    TextRule::new(field.field("vaccine_brand"), event.vaccine_brand.as_deref())
        .required()
        .charset(Charset::Vds)
        .one_of(&policy.vaccine_brands)
        .check(violations)?;

    TextRule::new(
        field.field("disease_or_agent_targeted"),
        event.disease_or_agent_targeted.as_deref(),
    )
    .required()
    .charset(Charset::Vds)
    .length(1, 6)
    .one_of(&policy.diseases_or_agents_targeted)
    .check(violations)?;

    let details_field = field.field("vaccination_details");
    for (index, details) in event.vaccination_details.iter().enumerate() {
        validate_details(details, policy, &details_field.index(index), violations)?;
    }
    Ok(())
}

/// Validates a single dose record.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_details(
    details: &VaccinationDetails,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(
        field.field("date_of_vaccination"),
        details.date_of_vaccination.as_deref(),
    )
    .required()
    .iso_date()
    .check(violations)?;

    IntRule::new(field.field("dose_number"), details.dose_number)
        .range(1, 99)
        .check(violations)?;

    TextRule::new(
        field.field("country_of_vaccination"),
        details.country_of_vaccination.as_deref(),
    )
    .required()
    .country(&policy.vaccination_countries)
    .check(violations)?;

    TextRule::new(
        field.field("administering_centre"),
        details.administering_centre.as_deref(),
    )
    .required()
    .length(1, 20)
    .charset(Charset::Vds)
    .check(violations)?;

    TextRule::new(
        field.field("vaccine_batch_number"),
        details.vaccine_batch_number.as_deref(),
    )
    .required()
    .length(1, 20)
    .charset(Charset::Vds)
    .check(violations)?;

    // An empty due date counts as not given unless the field is required.
    let due = details
        .due_date_of_next_dose
        .as_deref()
        .filter(|value| {
            policy.check_due_date_of_next_dose != Optionality::Optional || !value.is_empty()
        });
    TextRule::new(field.field("due_date_of_next_dose"), due)
        .optionality(policy.check_due_date_of_next_dose, TextRule::iso_date)
        .check(violations)
}

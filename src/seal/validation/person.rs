//! Person identification validation.

use super::{Charset, FieldPath, TextConstraint, TextRule, Violations};
use crate::seal::{
    domain::{PersonIdentification, Sex},
    policy::ValidationPolicy,
    ports::ValidationResult,
};

/// Validates the holder's name, date of birth, identifiers and sex.
///
/// The date of birth is required when no travel document number is given
/// or when the policy requires it unconditionally.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_person(
    person: &PersonIdentification,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(field.field("name"), person.name.as_deref())
        .required()
        .length(1, 39)
        .charset(Charset::Vds)
        .check(violations)?;

    let identifier_missing = person
        .unique_identifier
        .as_deref()
        .is_none_or(|identifier| identifier.trim().is_empty());
    TextRule::new(field.field("date_of_birth"), person.date_of_birth.as_deref())
        .required_if(identifier_missing || policy.require_date_of_birth)
        .constraint(TextConstraint::PartialDate {
            filler: policy.date_of_birth_filler,
        })
        .check(violations)?;

    TextRule::new(
        field.field("unique_identifier"),
        person.unique_identifier.as_deref(),
    )
    .required_if(policy.require_unique_identifier)
    .length(1, 11)
    .charset(Charset::Vds)
    .check(violations)?;

    TextRule::new(
        field.field("additional_identifier"),
        person.additional_identifier.as_deref(),
    )
    .optionality(policy.check_additional_identifier, |rule| {
        rule.length(1, 24).charset(Charset::Vds)
    })
    .check(violations)?;

    let sexes = Sex::codes();
    TextRule::new(field.field("sex"), person.sex.as_deref())
        .required()
        .one_of(&sexes)
        .check(violations)
}

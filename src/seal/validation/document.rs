//! Message, data and root document validation.
//!
//! These validators compose the node validators into a tree that mirrors
//! the document: root → data → header and message → person and events →
//! doses, plus the signature when the policy requires one.

use super::{
    Charset, FieldPath, TextRule, Violations, validate_event, validate_header, validate_person,
    validate_signature,
};
use crate::seal::{
    domain::{PovMessage, Vds, VdsData},
    policy::ValidationPolicy,
    ports::ValidationResult,
};

/// Validates the UVCI, the holder and every vaccination event.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_message(
    message: &PovMessage,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(field.field("uvci"), message.uvci.as_deref())
        .required()
        .length(1, 12)
        .charset(Charset::Vds)
        .check(violations)?;

    validate_person(
        &message.person_identification,
        policy,
        &field.field("person_identification"),
        violations,
    )?;

    let events_field = field.field("vaccination_events");
    for (index, event) in message.vaccination_events.iter().enumerate() {
        validate_event(event, policy, &events_field.index(index), violations)?;
    }
    Ok(())
}

/// Validates the signed portion of the seal.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_data(
    data: &VdsData,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    validate_header(&data.header, policy, &field.field("header"), violations)?;
    validate_message(&data.message, policy, &field.field("message"), violations)
}

/// Validates a whole seal.
///
/// The signature is checked only when the policy requires one, so the same
/// validator serves before and after signing.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_vds(
    vds: &Vds,
    policy: &ValidationPolicy,
    violations: &mut Violations,
) -> ValidationResult<()> {
    let root = FieldPath::root();
    validate_data(&vds.data, policy, &root.field("data"), violations)?;

    if !policy.require_signature {
        return Ok(());
    }
    let signature_field = root.field("signature");
    let Some(signature) = vds.signature.as_ref() else {
        return TextRule::new(signature_field, None)
            .required()
            .check(violations);
    };
    validate_signature(signature, policy, &signature_field, violations)
}

//! Header validation.

use super::{Charset, FieldPath, IntRule, TextConstraint, TextRule, Violations};
use crate::seal::{domain::VdsHeader, policy::ValidationPolicy, ports::ValidationResult};

/// Validates the seal type, issuing country and schema version.
///
/// Without an issuing-country allow-list the country must be a
/// three-character code. A wrong version yields exactly one message.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_header(
    header: &VdsHeader,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(field.field("type"), header.kind.as_deref())
        .charset(Charset::Vds)
        .required()
        .one_of(&policy.vds_types)
        .check(violations)?;

    TextRule::new(
        field.field("issuing_country"),
        header.issuing_country.as_deref(),
    )
    .required()
    .charset(Charset::Vds)
    .one_of(&policy.issuing_countries)
    .constraint_if(
        policy.issuing_countries.is_empty(),
        TextConstraint::CountryCode,
    )
    .check(violations)?;

    IntRule::new(field.field("version"), header.version)
        .equals(VdsHeader::CURRENT_VERSION)
        .check(violations)
}

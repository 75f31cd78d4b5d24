//! Signature block validation.

use super::{Charset, FieldPath, TextRule, Violations};
use crate::seal::{domain::VdsSignature, policy::ValidationPolicy, ports::ValidationResult};

/// Validates the algorithm, certificate and signature value.
///
/// Extension fields are not inspected.
///
/// # Errors
///
/// Returns `ValidationError::Internal` if a rule cannot be evaluated.
pub fn validate_signature(
    signature: &VdsSignature,
    policy: &ValidationPolicy,
    field: &FieldPath,
    violations: &mut Violations,
) -> ValidationResult<()> {
    TextRule::new(field.field("algorithm"), signature.algorithm.as_deref())
        .required()
        .one_of(&policy.signing_algorithms)
        .check(violations)?;

    TextRule::new(field.field("certificate"), signature.certificate.as_deref())
        .required()
        .charset(Charset::Base64Url)
        .check(violations)?;

    TextRule::new(field.field("value"), signature.value.as_deref())
        .required()
        .charset(Charset::Base64Url)
        .check(violations)
}

//! Validation service implementation.
//!
//! Provides the policy-driven implementation of the `VdsValidator` port,
//! running the composed node validators over a whole seal.

use super::{Violations, validate_vds};
use crate::seal::{
    domain::Vds,
    error::ValidationError,
    policy::ValidationPolicy,
    ports::{ValidationResult, VdsValidator},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Policy-driven seal validator.
///
/// Collects every failure by default. With
/// [`ValidationPolicy::fail_fast`] set, the first failure is raised as
/// [`ValidationError::Rejected`] instead.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::domain::{
///     PersonIdentification, PovMessage, Sex, VaccinationDetails, VaccinationEvent, Vds,
///     VdsHeader,
/// };
/// use visible_seal::seal::ports::VdsValidator;
/// use visible_seal::seal::validation::PolicyValidator;
///
/// let person = PersonIdentification::new("SMITH  JOHN", Sex::Male)
///     .with_date_of_birth("1980-01-31");
/// let message = PovMessage::new("U32870", person).with_event(
///     VaccinationEvent::new("RA01", "XM68M6", "Comirnaty").with_dose(VaccinationDetails::new(
///         "2021-03-03",
///         1,
///         "AUS",
///         "General Practitioner",
///         "A1234",
///     )),
/// );
/// let vds = Vds::new(VdsHeader::new("icao.vacc", "AUS"), message);
///
/// let validator = PolicyValidator::new();
/// let messages = validator.validate(&vds).expect("validator is usable");
/// assert!(messages.is_empty(), "{messages:?}");
/// ```
#[derive(Debug, Clone)]
pub struct PolicyValidator {
    policy: Arc<ValidationPolicy>,
}

impl PolicyValidator {
    /// Creates a validator with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: Arc::new(ValidationPolicy::default()),
        }
    }

    /// Creates a validator with a custom policy.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Configuration` if the policy is
    /// internally inconsistent.
    pub fn with_policy(policy: impl Into<Arc<ValidationPolicy>>) -> ValidationResult<Self> {
        let shared = policy.into();
        shared.validate()?;
        Ok(Self { policy: shared })
    }

    /// Returns the validation policy.
    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }
}

impl Default for PolicyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl VdsValidator for PolicyValidator {
    fn validate(&self, vds: &Vds) -> ValidationResult<Vec<String>> {
        let mut violations = Violations::new();
        validate_vds(vds, &self.policy, &mut violations)?;

        if violations.is_empty() {
            debug!("seal passed validation");
            return Ok(Vec::new());
        }

        info!(failures = violations.len(), "seal failed validation");
        let mut messages = violations.into_messages();
        if self.policy.fail_fast {
            messages.truncate(1);
            return Err(ValidationError::Rejected { messages });
        }
        Ok(messages)
    }
}

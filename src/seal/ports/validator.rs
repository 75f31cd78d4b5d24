//! Validator port for seal validation.

use crate::seal::{domain::Vds, error::ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Port for seal validation.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Collect every failure into the returned list unless configured to
///   fail fast
/// - Be stateless and thread-safe
/// - Never mutate the seal
pub trait VdsValidator: Send + Sync {
    /// Validates a seal, returning one message per failed rule.
    ///
    /// An empty list means the seal is valid.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Rejected` on the first failure in fail-fast
    /// mode, or another `ValidationError` when the validator is unusable.
    fn validate(&self, vds: &Vds) -> ValidationResult<Vec<String>>;
}

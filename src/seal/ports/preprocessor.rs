//! Preprocessor port.

use crate::seal::domain::{AdditionalInformation, Vds};
use std::convert::Infallible;

/// A transform applied to a seal before validation.
///
/// Preprocessors may rewrite the seal and record diagnostics in the
/// additional information bag. They must be idempotent.
pub trait Preprocessor: Send + Sync {
    /// Error raised when the transform cannot be applied.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Transforms the seal in place.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the transform cannot be applied.
    fn process(&self, vds: &mut Vds, info: &mut AdditionalInformation)
    -> Result<(), Self::Error>;
}

/// A preprocessor that leaves every seal untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    type Error = Infallible;

    fn process(&self, _: &mut Vds, _: &mut AdditionalInformation) -> Result<(), Self::Error> {
        Ok(())
    }
}

//! Signer port for obtaining seal signatures.

use crate::seal::{
    domain::{IssuedSignature, Vds},
    error::SignerError,
};
use async_trait::async_trait;

/// Result type for signing operations.
pub type SignerResult<T> = Result<T, SignerError>;

/// Port for signing services.
///
/// The signer receives the validated, preprocessed seal and returns the
/// signature values to overlay onto it. It must not be called for a seal
/// that failed validation.
#[async_trait]
pub trait Signer: Send + Sync {
    /// Signs the data node of a seal.
    ///
    /// # Errors
    ///
    /// Returns `SignerError` if the service is unreachable, refuses the
    /// request, or answers with an unusable response.
    async fn sign(&self, vds: &Vds) -> SignerResult<IssuedSignature>;
}

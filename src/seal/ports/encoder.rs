//! String encoder port.

use crate::seal::{domain::Vds, error::EncodingError};

/// Converts a seal to the exact strings that are signed and encoded.
pub trait StringEncoder: Send + Sync {
    /// Returns the payload submitted for signing.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the seal cannot be serialised.
    fn encode_for_signing(&self, vds: &Vds) -> Result<String, EncodingError>;

    /// Returns the payload embedded in the barcode.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError` if the seal cannot be serialised.
    fn encode_for_barcode(&self, vds: &Vds) -> Result<String, EncodingError>;
}

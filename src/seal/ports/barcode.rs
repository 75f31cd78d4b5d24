//! Barcode renderer port.

use crate::seal::{
    domain::{BarcodeResult, Vds},
    error::RenderError,
};

/// Port for turning a signed seal into barcode bytes.
pub trait BarcodeRenderer: Send + Sync {
    /// Renders the barcode for a signed seal.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the seal cannot be encoded or the
    /// configured format is unsupported.
    fn render(&self, vds: &Vds) -> Result<BarcodeResult, RenderError>;
}

//! Document renderer port.

use crate::seal::{
    domain::{AdditionalInformation, BarcodeResult, DocumentResult, Vds},
    error::RenderError,
};

/// Port for producing the final printable document.
///
/// The renderer takes ownership of the signed seal, its barcode and the
/// run's context, and hands them on inside the [`DocumentResult`].
pub trait DocumentRenderer: Send + Sync {
    /// Renders the document for a signed seal and its barcode.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if no template applies or rendering fails.
    fn render(
        &self,
        vds: Vds,
        barcode: BarcodeResult,
        info: AdditionalInformation,
    ) -> Result<DocumentResult, RenderError>;
}

//! Adapter implementations of the seal ports.
//!
//! - [`JsonStringEncoder`] produces the canonical JSON payloads.
//! - [`DemoSigner`] and [`HttpSigner`] provide signatures.
//! - [`PayloadBarcodeRenderer`] emits the barcode payload for external
//!   rasterisation.
//! - [`BarcodeOnlyDocumentRenderer`] and [`HtmlDocumentRenderer`] produce
//!   the final document.

pub mod barcode;
pub mod document;
pub mod encoder;
pub mod signer;

pub use barcode::{BarcodeFormat, PayloadBarcodeRenderer};
pub use document::{BarcodeOnlyDocumentRenderer, HtmlDocumentRenderer};
pub use encoder::JsonStringEncoder;
pub use signer::{DemoSigner, HttpSigner, HttpSignerConfig};

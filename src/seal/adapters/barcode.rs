//! Barcode payload renderer.

use crate::seal::{
    domain::{BarcodeResult, Vds},
    error::RenderError,
    ports::{BarcodeRenderer, StringEncoder},
};
use std::fmt;
use tracing::debug;

use super::JsonStringEncoder;

/// Barcode output formats produced in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BarcodeFormat {
    /// The UTF-8 barcode payload, for hosts that rasterise the symbol
    /// themselves.
    #[default]
    Text,
}

impl BarcodeFormat {
    /// Parses a format name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnsupportedFormat` for any other name,
    /// including raster image formats.
    ///
    /// # Examples
    ///
    /// ```
    /// use visible_seal::seal::adapters::BarcodeFormat;
    ///
    /// assert_eq!(BarcodeFormat::parse("TEXT").ok(), Some(BarcodeFormat::Text));
    /// assert!(BarcodeFormat::parse("png").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, RenderError> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            _ => Err(RenderError::UnsupportedFormat(name.to_owned())),
        }
    }

    /// Returns the canonical format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the encoded barcode payload as the barcode bytes.
#[derive(Debug, Clone, Default)]
pub struct PayloadBarcodeRenderer<E = JsonStringEncoder> {
    encoder: E,
    format: BarcodeFormat,
}

impl PayloadBarcodeRenderer {
    /// Creates a renderer using the JSON encoder and the text format.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            encoder: JsonStringEncoder,
            format: BarcodeFormat::Text,
        }
    }
}

impl<E: StringEncoder> PayloadBarcodeRenderer<E> {
    /// Creates a renderer with a custom encoder.
    #[must_use]
    pub const fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            format: BarcodeFormat::Text,
        }
    }

    /// Selects the output format by name.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnsupportedFormat` for unknown names.
    pub fn with_format_name(mut self, name: &str) -> Result<Self, RenderError> {
        self.format = BarcodeFormat::parse(name)?;
        Ok(self)
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> BarcodeFormat {
        self.format
    }
}

impl<E: StringEncoder> BarcodeRenderer for PayloadBarcodeRenderer<E> {
    fn render(&self, vds: &Vds) -> Result<BarcodeResult, RenderError> {
        let payload = self.encoder.encode_for_barcode(vds)?;
        debug!(bytes = payload.len(), format = %self.format, "encoded barcode payload");
        Ok(BarcodeResult::new(payload.into_bytes(), self.format.as_str()))
    }
}

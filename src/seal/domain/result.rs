//! Rendering outputs and the pipeline outcome.

use super::{AdditionalInformation, Vds};
use serde::Serialize;

/// A rendered barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarcodeResult {
    /// Encoded barcode bytes.
    pub bytes: Vec<u8>,
    /// Output format name, such as `text` or `png`.
    pub format: String,
}

impl BarcodeResult {
    /// Creates a barcode result.
    #[must_use]
    pub fn new(bytes: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            bytes,
            format: format.into(),
        }
    }

    /// Returns the bytes as UTF-8 text when they are valid UTF-8.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// A rendered seal document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    /// Document bytes.
    pub bytes: Vec<u8>,
    /// Document format name, such as `html`.
    pub format: String,
    /// The barcode embedded in the document.
    pub barcode: BarcodeResult,
    /// The signed seal the document was rendered from.
    pub vds: Vds,
    /// Context the document was rendered with.
    pub additional_information: AdditionalInformation,
}

/// A seal that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// The document after preprocessing.
    pub vds: Vds,
    /// Context collected before validation stopped the run.
    pub additional_information: AdditionalInformation,
    /// Every validation failure, in evaluation order.
    pub messages: Vec<String>,
}

/// Outcome of one issuance run.
#[derive(Debug, Clone, PartialEq)]
pub enum SealOutcome {
    /// The seal was signed and rendered.
    Issued(Box<DocumentResult>),
    /// The seal failed validation and was not signed.
    Rejected(Rejection),
}

impl SealOutcome {
    /// Returns `true` when the seal was issued.
    #[must_use]
    pub const fn is_issued(&self) -> bool {
        matches!(self, Self::Issued(_))
    }

    /// Returns the rendered document when issued.
    #[must_use]
    pub fn document(&self) -> Option<&DocumentResult> {
        match self {
            Self::Issued(document) => Some(document),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the validation messages; empty when issued.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Issued(_) => &[],
            Self::Rejected(rejection) => &rejection.messages,
        }
    }

    /// Returns the document the outcome refers to.
    #[must_use]
    pub fn vds(&self) -> &Vds {
        match self {
            Self::Issued(document) => &document.vds,
            Self::Rejected(rejection) => &rejection.vds,
        }
    }

    /// Returns the context carried by the outcome.
    #[must_use]
    pub fn additional_information(&self) -> &AdditionalInformation {
        match self {
            Self::Issued(document) => &document.additional_information,
            Self::Rejected(rejection) => &rejection.additional_information,
        }
    }
}

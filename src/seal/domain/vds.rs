//! Root seal document, header and signature types.
//!
//! Field names serialise to the short keys defined for ICAO VDS-NC so that
//! the serde representation doubles as the canonical wire encoding.

use super::PovMessage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A Visible Digital Seal document.
///
/// The document is the root unit of validation and signing. The signature is
/// absent until the signing collaborator has produced one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vds {
    /// The signed portion of the seal.
    pub data: VdsData,
    /// Signature over [`Vds::data`], populated after signing.
    #[serde(rename = "sig", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<VdsSignature>,
}

impl Vds {
    /// Creates an unsigned document from its header and message.
    #[must_use]
    pub const fn new(header: VdsHeader, message: PovMessage) -> Self {
        Self {
            data: VdsData { header, message },
            signature: None,
        }
    }

    /// Attaches a pre-populated signature object.
    ///
    /// Used by callers that carry extension fields on the signature block
    /// which must survive signing.
    #[must_use]
    pub fn with_signature(mut self, signature: VdsSignature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Returns the header.
    #[must_use]
    pub const fn header(&self) -> &VdsHeader {
        &self.data.header
    }

    /// Returns the proof-of-vaccination message.
    #[must_use]
    pub const fn message(&self) -> &PovMessage {
        &self.data.message
    }

    /// Returns the proof-of-vaccination message for in-place edits.
    pub const fn message_mut(&mut self) -> &mut PovMessage {
        &mut self.data.message
    }

    /// Overlays a freshly issued signature onto this document.
    ///
    /// When a signature object already exists only its algorithm, certificate
    /// and value are replaced; its extension fields are kept. Otherwise a new
    /// signature object is created.
    pub fn apply_signature(&mut self, issued: IssuedSignature) {
        self.signature
            .get_or_insert_with(VdsSignature::default)
            .overlay(issued);
    }
}

/// The portion of a seal covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdsData {
    /// Seal header.
    #[serde(rename = "hdr")]
    pub header: VdsHeader,
    /// Use-case specific message body.
    #[serde(rename = "msg")]
    pub message: PovMessage,
}

/// Seal header identifying the seal type, schema version and issuer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VdsHeader {
    /// Seal type, for example `icao.vacc`.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Schema version. Only version 1 is defined.
    #[serde(rename = "v", default)]
    pub version: i32,
    /// Three-letter code of the issuing country.
    #[serde(rename = "is", default, skip_serializing_if = "Option::is_none")]
    pub issuing_country: Option<String>,
}

impl VdsHeader {
    /// The only schema version currently defined.
    pub const CURRENT_VERSION: i32 = 1;

    /// Creates a version 1 header.
    #[must_use]
    pub fn new(kind: impl Into<String>, issuing_country: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            version: Self::CURRENT_VERSION,
            issuing_country: Some(issuing_country.into()),
        }
    }

    /// Overrides the schema version.
    #[must_use]
    pub const fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }
}

/// Signature block of a seal.
///
/// Unknown keys are captured in [`VdsSignature::extensions`] and written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VdsSignature {
    /// Signature algorithm identifier.
    #[serde(rename = "alg", default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Base64url encoded signing certificate.
    #[serde(rename = "cer", default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    /// Base64url encoded signature value.
    #[serde(rename = "sigvl", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Caller-supplied fields outside the ICAO schema.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

impl VdsSignature {
    /// The fields copied from an [`IssuedSignature`] by [`VdsSignature::overlay`].
    pub const OVERLAID_FIELDS: [&'static str; 3] = ["alg", "cer", "sigvl"];

    /// Adds an extension field.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }

    /// Replaces the algorithm, certificate and value with the issued ones.
    ///
    /// Extension fields are left untouched.
    pub fn overlay(&mut self, issued: IssuedSignature) {
        self.algorithm = Some(issued.algorithm);
        self.certificate = Some(issued.certificate);
        self.value = Some(issued.value);
    }
}

impl From<IssuedSignature> for VdsSignature {
    fn from(issued: IssuedSignature) -> Self {
        let mut signature = Self::default();
        signature.overlay(issued);
        signature
    }
}

/// The three signature fields returned by a signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedSignature {
    /// Signature algorithm identifier.
    #[serde(rename = "alg")]
    pub algorithm: String,
    /// Base64url encoded signing certificate.
    #[serde(rename = "cer")]
    pub certificate: String,
    /// Base64url encoded signature value.
    #[serde(rename = "sigvl")]
    pub value: String,
}

impl IssuedSignature {
    /// Creates an issued signature.
    #[must_use]
    pub fn new(
        algorithm: impl Into<String>,
        certificate: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            certificate: certificate.into(),
            value: value.into(),
        }
    }
}

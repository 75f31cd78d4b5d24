//! Error types for seal validation and issuance.
//!
//! Validation *failures* are data (a list of messages) and never appear
//! here unless fail-fast mode is enabled. The types below are faults.

use camino::Utf8Path;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the validator itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The policy cannot be turned into a validator.
    #[error("invalid validation configuration: {0}")]
    Configuration(String),

    /// A rule was applied to a value it cannot check.
    #[error("internal validation error: {0}")]
    Internal(String),

    /// Fail-fast mode stopped at the first failure.
    #[error("seal failed validation: {}", .messages.join("; "))]
    Rejected {
        /// The failure that stopped validation.
        messages: Vec<String>,
    },
}

impl ValidationError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the failure messages carried by a fail-fast rejection.
    #[must_use]
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            Self::Rejected { messages } => Some(messages),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for ValidationError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Errors raised while loading or checking a policy.
#[derive(Debug, Clone, Error)]
pub enum ConfigurationError {
    /// The policy file could not be read.
    #[error("failed to read policy file '{path}': {source}")]
    Read {
        /// Path of the policy file.
        path: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The policy document is not valid JSON for the policy schema.
    #[error("failed to parse policy: {0}")]
    Parse(Arc<serde_json::Error>),

    /// The policy values contradict each other.
    #[error("inconsistent policy: {0}")]
    Inconsistent(String),
}

impl ConfigurationError {
    /// Creates a read error.
    #[must_use]
    pub fn read(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_string(),
            source: Arc::new(source),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(source: serde_json::Error) -> Self {
        Self::Parse(Arc::new(source))
    }

    /// Creates an inconsistency error.
    #[must_use]
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent(message.into())
    }
}

/// Stages of the issuance pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Dose truncation and other transforms.
    Preprocess,
    /// Policy validation.
    Validate,
    /// Remote signing.
    Sign,
    /// Barcode rendering.
    RenderBarcode,
    /// Document rendering.
    RenderDocument,
}

impl PipelineStage {
    /// Returns a stable name for logs and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preprocess => "preprocess",
            Self::Validate => "validate",
            Self::Sign => "sign",
            Self::RenderBarcode => "render_barcode",
            Self::RenderDocument => "render_document",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal fault raised during issuance.
///
/// No partial result accompanies a pipeline error.
#[derive(Debug, Error)]
#[error("seal issuance failed during {stage}: {source}")]
pub struct PipelineError {
    /// The stage that raised the fault.
    pub stage: PipelineStage,
    /// The fault.
    #[source]
    pub source: Arc<dyn std::error::Error + Send + Sync>,
}

impl PipelineError {
    /// Wraps a fault with its stage.
    #[must_use]
    pub fn at(stage: PipelineStage, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            stage,
            source: Arc::new(err),
        }
    }

    /// Returns the stage that raised the fault.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        self.stage
    }
}

/// Result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised by a signing service.
#[derive(Debug, Clone, Error)]
pub enum SignerError {
    /// The signing service could not be reached.
    #[error("signing service unavailable: {0}")]
    Unavailable(String),

    /// The signing service refused the request.
    #[error("signing service rejected the request with status {status}: {body}")]
    Rejected {
        /// HTTP status or service-specific code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The signing service answered with an unusable response.
    #[error("invalid signing service response: {0}")]
    InvalidResponse(String),

    /// The seal could not be encoded for signing.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl SignerError {
    /// Creates an unavailability error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// Errors raised while rendering barcodes or documents.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The requested output format is not supported.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The seal could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// No document template is registered for the seal type.
    #[error("no document template for '{0}'")]
    MissingTemplate(String),

    /// The document template failed to load or render.
    #[error("template error: {0}")]
    Template(Arc<minijinja::Error>),

    /// A template file could not be read.
    #[error("failed to read template: {0}")]
    Read(#[from] ConfigurationError),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(Arc::new(err))
    }
}

/// Errors raised while encoding a seal to its string form.
#[derive(Debug, Clone, Error)]
#[error("failed to encode seal: {0}")]
pub struct EncodingError(Arc<serde_json::Error>);

impl From<serde_json::Error> for EncodingError {
    fn from(err: serde_json::Error) -> Self {
        Self(Arc::new(err))
    }
}

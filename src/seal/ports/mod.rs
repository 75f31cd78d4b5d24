//! Port definitions for the seal issuance pipeline.
//!
//! Each collaborator of the generator is a trait so deployments can swap
//! validation policy, transforms, signing and rendering independently.

pub mod barcode;
pub mod document;
pub mod encoder;
pub mod preprocessor;
pub mod signer;
pub mod validator;

pub use barcode::BarcodeRenderer;
pub use document::DocumentRenderer;
pub use encoder::StringEncoder;
pub use preprocessor::{NoopPreprocessor, Preprocessor};
pub use signer::Signer;
pub use validator::{ValidationResult, VdsValidator};

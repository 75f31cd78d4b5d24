//! Visible Digital Seal issuance for proof of vaccination.
//!
//! # Architecture
//!
//! - **Domain**: Seal types ([`domain::Vds`], [`domain::PovMessage`],
//!   [`domain::SealOutcome`], etc.)
//! - **Policy**: Deployment configuration ([`policy::PolicyConfig`])
//! - **Ports**: Collaborator traits ([`ports::VdsValidator`],
//!   [`ports::Preprocessor`], [`ports::Signer`], [`ports::BarcodeRenderer`],
//!   [`ports::DocumentRenderer`])
//! - **Validation**: Declarative field rules composed per document node
//! - **Preprocess**: Dose truncation
//! - **Services**: The issuance pipeline ([`services::SealGenerator`])
//! - **Adapters**: Encoders, signers and renderers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use visible_seal::seal::adapters::{
//!     BarcodeOnlyDocumentRenderer, DemoSigner, PayloadBarcodeRenderer,
//! };
//! use visible_seal::seal::domain::{
//!     AdditionalInformation, PersonIdentification, PovMessage, Sex, VaccinationDetails,
//!     VaccinationEvent, Vds, VdsHeader,
//! };
//! use visible_seal::seal::policy::PolicyConfig;
//! use visible_seal::seal::preprocess::DoseTruncator;
//! use visible_seal::seal::services::SealGenerator;
//! use visible_seal::seal::validation::PolicyValidator;
//!
//! # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
//! let policy = PolicyConfig::default();
//! let generator = SealGenerator::new(
//!     Arc::new(PolicyValidator::with_policy(policy.validation).expect("consistent policy")),
//!     Arc::new(DoseTruncator::new(policy.truncation)),
//!     Arc::new(DemoSigner),
//!     Arc::new(PayloadBarcodeRenderer::new()),
//!     Arc::new(BarcodeOnlyDocumentRenderer),
//! );
//!
//! let person = PersonIdentification::new("SMITH  JOHN", Sex::Male).with_date_of_birth("1980-01-31");
//! let message = PovMessage::new("U32870", person).with_event(
//!     VaccinationEvent::new("RA01", "XM68M6", "Comirnaty").with_dose(VaccinationDetails::new(
//!         "2021-03-03",
//!         1,
//!         "AUS",
//!         "General Practitioner",
//!         "A1234",
//!     )),
//! );
//! let vds = Vds::new(VdsHeader::new("icao.vacc", "AUS"), message);
//!
//! let outcome = generator
//!     .run(vds, AdditionalInformation::new())
//!     .await
//!     .expect("pipeline completes");
//! assert!(outcome.is_issued());
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod preprocess;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;

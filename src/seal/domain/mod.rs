//! Domain types for Visible Digital Seals.
//!
//! Pure data with no infrastructure dependencies: the seal document tree,
//! the per-run context map and the pipeline outputs.

mod info;
mod result;
mod vaccination;
mod vds;

pub use info::{AdditionalInformation, keys};
pub use result::{BarcodeResult, DocumentResult, Rejection, SealOutcome};
pub use vaccination::{
    PersonIdentification, PovMessage, Sex, VaccinationDetails, VaccinationEvent,
};
pub use vds::{IssuedSignature, Vds, VdsData, VdsHeader, VdsSignature};

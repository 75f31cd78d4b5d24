//! Service layer for seal issuance.

pub mod generator;

pub use generator::SealGenerator;

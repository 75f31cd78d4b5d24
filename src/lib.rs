//! Visible Seal: issuance and validation of ICAO Visible Digital Seals.
//!
//! This crate validates proof-of-vaccination seals against the ICAO VDS-NC
//! schema and a deployment policy, bounds over-long vaccination histories,
//! and orchestrates signing and rendering of the final seal.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Seal documents and pipeline results with no infrastructure
//!   dependencies
//! - **Ports**: Trait interfaces for validation, preprocessing, signing and
//!   rendering
//! - **Adapters**: Concrete implementations (JSON encoding, HTTP signing,
//!   HTML documents)
//!
//! # Modules
//!
//! - [`seal`]: Seal model, validation, truncation and issuance pipeline
//! - [`mrz`]: Machine readable zone name and check digit helpers

pub mod mrz;
pub mod seal;

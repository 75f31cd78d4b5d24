//! Seal validation.
//!
//! Field constraints are declared with [`TextRule`] and [`IntRule`] and
//! evaluated into a [`Violations`] list. One validator function exists per
//! document node; [`validate_vds`] composes them into the full tree and
//! [`PolicyValidator`] exposes the tree through the `VdsValidator` port.

mod charset;
pub mod dates;
mod document;
mod header;
pub mod messages;
mod path;
mod person;
mod rules;
pub mod service;
mod signature;
mod vaccination;

pub use charset::Charset;
pub use document::{validate_data, validate_message, validate_vds};
pub use header::validate_header;
pub use path::FieldPath;
pub use person::validate_person;
pub use rules::{IntConstraint, IntRule, TextConstraint, TextRule, Violations};
pub use service::PolicyValidator;
pub use signature::validate_signature;
pub use vaccination::{validate_details, validate_event};

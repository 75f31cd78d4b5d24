//! Unit tests for the seal module.
//!
//! Tests are organised by layer, covering the rule engine, every node
//! validator, truncation, the issuance pipeline and the adapters.

mod adapters_tests;
mod domain_tests;
mod fixtures;
mod generator_tests;

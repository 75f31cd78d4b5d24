//! Machine readable zone helpers from ICAO Doc 9303.
//!
//! Seal issuers use these to prepare the holder name and document numbers
//! before building a seal.

mod check_digit;
mod name;

pub use check_digit::{check_digit, with_check_digit};
pub use name::{NameOptions, truncate_name};

//! Seal preprocessing.
//!
//! Transforms applied before validation. Dose truncation bounds the
//! vaccination history so the encoded seal fits its barcode.

mod priority;
mod truncation;

pub use priority::{DoseNumberPriority, DosePriority};
pub use truncation::{DoseTruncator, TruncationStats};

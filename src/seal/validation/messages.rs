//! Validation message catalogue.
//!
//! Every message names the offending field by its dotted path so that a
//! list of messages can be shown to an operator as-is.

use super::FieldPath;

/// Number of allowed values quoted in a not-in-set message.
pub const ALLOWED_VALUES_SHOWN: usize = 5;

/// A required field is absent.
#[must_use]
pub fn missing_field(field: &FieldPath) -> String {
    format!("The field {field} is required.")
}

/// A disallowed field is present.
#[must_use]
pub fn must_be_absent(field: &FieldPath) -> String {
    format!("The field {field} must not have a value.")
}

/// A text field is too short or too long.
#[must_use]
pub fn outside_length(field: &FieldPath, min: usize, max: usize) -> String {
    format!("The field {field} must be between {min} and {max} characters.")
}

/// A number lies outside its inclusive range.
#[must_use]
pub fn outside_value_range(field: &FieldPath, from: i32, to: i32) -> String {
    format!("The field {field} must be between {from} and {to}.")
}

/// A field differs from its only permitted value.
#[must_use]
pub fn invalid_equality(field: &FieldPath, value: i32, expected: i32) -> String {
    format!("The field {field} has an invalid value of '{value}'. Must equal: {expected}")
}

/// A field contains characters outside its character set.
#[must_use]
pub fn invalid_characters(field: &FieldPath, offending: &[char]) -> String {
    let quoted: Vec<String> = offending.iter().map(|c| format!("'{c}'")).collect();
    format!(
        "The field {field} contains invalid character(s): {}.",
        quoted.join(", ")
    )
}

/// A country field without an allow-list is not a three-letter code.
#[must_use]
pub fn country_code(field: &FieldPath) -> String {
    format!(
        "The field {field} must be a 3-Letter country code as defined in ICAO Doc 9303-3."
    )
}

/// A date field is not a full calendar date.
#[must_use]
pub fn invalid_date(field: &FieldPath) -> String {
    format!("The field {field} must be in YYYY-MM-DD format.")
}

/// A date of birth is neither a full date nor a filler-padded partial date.
#[must_use]
pub fn invalid_partial_date(field: &FieldPath, filler: char) -> String {
    format!(
        "The field {field} must be in one of the following formats: YYYY-MM-DD, \
         YYYY-MM-{filler}{filler}, or YYYY-{filler}{filler}-{filler}{filler}."
    )
}

/// A field value is not in its allow-list.
///
/// Only the first [`ALLOWED_VALUES_SHOWN`] allowed values are quoted.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::validation::{FieldPath, messages::not_in_set};
///
/// let allowed: Vec<String> = ["F", "M", "X"].map(String::from).to_vec();
/// let field = FieldPath::root().field("sex");
/// assert_eq!(
///     not_in_set(&field, &allowed),
///     r#"The field sex must be one of: "F", "M", "X""#,
/// );
/// ```
#[must_use]
pub fn not_in_set(field: &FieldPath, allowed: &[String]) -> String {
    let quoted: Vec<String> = allowed
        .iter()
        .take(ALLOWED_VALUES_SHOWN)
        .map(|value| format!("\"{value}\""))
        .collect();
    let remainder = allowed.len().saturating_sub(ALLOWED_VALUES_SHOWN);
    if remainder == 0 {
        format!("The field {field} must be one of: {}", quoted.join(", "))
    } else {
        format!(
            "The field {field} must be one of: {} and {remainder} more value(s)",
            quoted.join(", ")
        )
    }
}

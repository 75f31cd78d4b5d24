//! Calendar date format checks.
//!
//! Dates are ISO 8601 calendar dates (`YYYY-MM-DD`). Dates of birth may
//! additionally be partial, with the omitted month and day replaced by two
//! filler characters each (`YYYY-MM-<<` or `YYYY-<<-<<`).

use chrono::{Datelike, NaiveDate};

/// Returns `true` for a valid `YYYY-MM-DD` calendar date.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::validation::dates::is_iso_date;
///
/// assert!(is_iso_date("2024-02-29"));
/// assert!(!is_iso_date("2023-02-29"));
/// assert!(!is_iso_date("2023-2-28"));
/// assert!(!is_iso_date("0000-01-01"));
/// ```
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    has_shape(value, 10)
        && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok_and(|date| date.year() >= 1)
}

/// Returns `true` for a valid `YYYY-MM` year and month.
#[must_use]
pub fn is_year_month(value: &str) -> bool {
    if !has_shape(value, 7) {
        return false;
    }
    let Some((year_text, month_text)) = value.split_once('-') else {
        return false;
    };
    match (year_text.parse::<i32>(), month_text.parse::<u32>()) {
        (Ok(year), Ok(month)) => year >= 1 && NaiveDate::from_ymd_opt(year, month, 1).is_some(),
        _ => false,
    }
}

/// Returns `true` for a valid four-digit year.
#[must_use]
pub fn is_year(value: &str) -> bool {
    has_shape(value, 4)
        && value
            .parse::<i32>()
            .is_ok_and(|year| year >= 1 && NaiveDate::from_ymd_opt(year, 1, 1).is_some())
}

/// Returns `true` for a full date, or for a filler-padded partial date when
/// a filler is configured.
///
/// Full dates are tried first, then year-and-month, then year-only.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::validation::dates::is_date_of_birth;
///
/// assert!(is_date_of_birth("2021-<<-<<", Some('<')));
/// assert!(is_date_of_birth("2021-05-<<", Some('<')));
/// assert!(!is_date_of_birth("2021-<<-<<", None));
/// assert!(!is_date_of_birth("2021", Some('<')));
/// ```
#[must_use]
pub fn is_date_of_birth(value: &str, filler: Option<char>) -> bool {
    if is_iso_date(value) {
        return true;
    }
    let Some(pad) = filler else {
        return false;
    };

    let month_and_day_omitted = format!("-{pad}{pad}-{pad}{pad}");
    let day_omitted = format!("-{pad}{pad}");

    if let Some(year) = value.strip_suffix(month_and_day_omitted.as_str())
        && is_year(year)
    {
        return true;
    }
    value
        .strip_suffix(day_omitted.as_str())
        .is_some_and(is_year_month)
}

/// Checks digit and separator positions so that the lenient chrono parser
/// cannot accept unpadded or signed components.
fn has_shape(value: &str, len: usize) -> bool {
    value.len() == len
        && value.bytes().enumerate().all(|(position, byte)| {
            if position == 4 || position == 7 {
                byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
}

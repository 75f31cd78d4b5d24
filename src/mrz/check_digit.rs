//! The 7-3-1 check digit.

/// Repeating weights applied to character values.
const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Computes the check digit of a string.
///
/// Digits count as their value, letters as `A = 10` through `Z = 35`
/// regardless of case, and every other character, including the `<`
/// filler, as zero. Returns `None` for an empty string.
///
/// # Examples
///
/// ```
/// use visible_seal::mrz::check_digit;
///
/// assert_eq!(check_digit("L898902C3"), Some(6));
/// assert_eq!(check_digit("740812"), Some(2));
/// assert_eq!(check_digit(""), None);
/// ```
#[must_use]
pub fn check_digit(input: &str) -> Option<u8> {
    if input.is_empty() {
        return None;
    }
    let sum: u32 = input
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, weight)| character_value(c) * weight)
        .sum();
    u8::try_from(sum.rem_euclid(10)).ok()
}

/// Appends the check digit to a string.
///
/// Returns `None` for an empty or whitespace-only string.
///
/// # Examples
///
/// ```
/// use visible_seal::mrz::with_check_digit;
///
/// assert_eq!(with_check_digit("L898902C3").as_deref(), Some("L898902C36"));
/// assert_eq!(with_check_digit("   "), None);
/// ```
#[must_use]
pub fn with_check_digit(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }
    check_digit(input).map(|digit| format!("{input}{digit}"))
}

fn character_value(c: char) -> u32 {
    if let Some(digit) = c.to_digit(10) {
        return digit;
    }
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        return u32::from(upper) - u32::from('A') + 10;
    }
    0
}

//! Holder name truncation.

/// Limits and filler used by [`truncate_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions {
    /// Maximum length of the combined name.
    pub max_length: usize,
    /// Maximum length kept of the primary identifier.
    pub max_primary_length: usize,
    /// Filler character separating name components.
    pub filler: char,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            max_length: 39,
            max_primary_length: 31,
            filler: '<',
        }
    }
}

/// Formats and truncates a holder name following the MRZ name rules.
///
/// Apostrophes and hyphens are removed and runs of spaces become single
/// fillers. The primary identifier is cut to its maximum length, followed
/// by one filler, then by a second filler and the secondary identifier when
/// one is given. When the combined name is too long and the cut lands on a
/// filler, the last position keeps the initial of the next name
/// component. A missing primary identifier is replaced by the secondary.
///
/// # Examples
///
/// ```
/// use visible_seal::mrz::{NameOptions, truncate_name};
///
/// let options = NameOptions::default();
/// assert_eq!(truncate_name("O'Brien-Smith", "Mary Jane", options), "OBrienSmith<<Mary<Jane");
/// assert_eq!(truncate_name("", "Cher", options), "Cher<");
/// ```
#[must_use]
pub fn truncate_name(primary: &str, secondary: &str, options: NameOptions) -> String {
    let NameOptions {
        max_length,
        max_primary_length,
        filler,
    } = options;

    let (primary_source, secondary_source) = if primary.is_empty() {
        (secondary, "")
    } else {
        (primary, secondary)
    };
    if primary_source.is_empty() {
        return String::new();
    }

    let cleaned_primary = clean(primary_source, filler);
    let cleaned_secondary = clean(secondary_source, filler);

    let mut combined: Vec<char> = cleaned_primary.chars().take(max_primary_length).collect();
    combined.push(filler);
    if !cleaned_secondary.is_empty() {
        combined.push(filler);
        combined.extend(cleaned_secondary.chars());
    }

    if combined.len() > max_length
        && max_length
            .checked_sub(1)
            .and_then(|last| combined.get(last))
            .is_some_and(|c| *c == filler)
    {
        let overflow_end = combined.len().saturating_sub(1);
        let remaining: String = combined
            .iter()
            .take(overflow_end)
            .skip(max_length)
            .collect();
        if let Some(initial) = remaining.trim().chars().next() {
            combined.truncate(max_length.saturating_sub(2));
            combined.push(filler);
            combined.push(initial);
        }
    }

    combined
        .into_iter()
        .take(max_length)
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Removes apostrophes and hyphens and joins space-separated words with
/// the filler.
fn clean(input: &str, filler: char) -> String {
    let stripped: String = input.chars().filter(|c| !matches!(c, '\'' | '-')).collect();
    let words: Vec<&str> = stripped.split(' ').filter(|word| !word.is_empty()).collect();
    let separator = filler.to_string();
    words.join(separator.as_str())
}

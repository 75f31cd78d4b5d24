//! Declarative field rules.
//!
//! A rule binds a field value to the constraints it must satisfy. Every
//! constraint of a rule is evaluated and every failure is collected; a
//! failed constraint never hides a later one.

use super::{Charset, FieldPath, dates, messages};
use crate::seal::{error::ValidationError, policy::Optionality, ports::ValidationResult};

/// Ordered collection of validation failure messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Records a failure.
    pub fn push(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Returns `true` when nothing failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns the recorded failures in evaluation order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the collection, returning its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// A constraint on an optional text field.
///
/// Apart from [`TextConstraint::Required`] and [`TextConstraint::Absent`],
/// constraints pass when the value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextConstraint<'a> {
    /// The value must be present.
    Required,
    /// The value must be absent.
    Absent,
    /// Character count within an inclusive range.
    Length {
        /// Minimum character count.
        min: usize,
        /// Maximum character count.
        max: usize,
    },
    /// Exactly three characters, reported as a country code failure.
    CountryCode,
    /// Only characters from the set. Empty values pass.
    Charset(Charset),
    /// One of the allowed values. Skipped when the list is empty.
    OneOf(&'a [String]),
    /// A full `YYYY-MM-DD` date.
    IsoDate,
    /// A full date or, with a filler, a filler-padded partial date.
    PartialDate {
        /// Filler character for omitted components.
        filler: Option<char>,
    },
}

impl TextConstraint<'_> {
    fn check(&self, field: &FieldPath, value: Option<&str>) -> ValidationResult<Option<String>> {
        let failure = match (*self, value) {
            (Self::Required, None) => Some(messages::missing_field(field)),
            (Self::Absent, Some(_)) => Some(messages::must_be_absent(field)),
            (Self::Length { min, max }, _) if min > max => {
                return Err(ValidationError::internal(format!(
                    "length bounds {min}..={max} for {field} are inverted"
                )));
            }
            (Self::Length { min, max }, Some(text)) => {
                let count = text.chars().count();
                (count < min || count > max).then(|| messages::outside_length(field, min, max))
            }
            (Self::CountryCode, Some(text)) => {
                (text.chars().count() != 3).then(|| messages::country_code(field))
            }
            (Self::Charset(charset), Some(text)) => {
                let offending = charset.offending(text);
                (!offending.is_empty()).then(|| messages::invalid_characters(field, &offending))
            }
            (Self::OneOf(allowed), Some(text)) => (!allowed.is_empty()
                && !allowed.iter().any(|candidate| candidate == text))
            .then(|| messages::not_in_set(field, allowed)),
            (Self::IsoDate, Some(text)) => {
                (!dates::is_iso_date(text)).then(|| messages::invalid_date(field))
            }
            (Self::PartialDate { filler }, Some(text)) => {
                (!dates::is_date_of_birth(text, filler)).then(|| {
                    filler.map_or_else(
                        || messages::invalid_date(field),
                        |padding| messages::invalid_partial_date(field, padding),
                    )
                })
            }
            _ => None,
        };
        Ok(failure)
    }
}

/// Constraints bound to one text field.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::validation::{Charset, FieldPath, TextRule, Violations};
///
/// let mut violations = Violations::new();
/// TextRule::new(FieldPath::root().field("uvci"), Some("ABC;1234567890"))
///     .required()
///     .length(1, 12)
///     .charset(Charset::Vds)
///     .check(&mut violations)
///     .expect("well-formed rule");
/// assert_eq!(violations.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TextRule<'a> {
    field: FieldPath,
    value: Option<&'a str>,
    constraints: Vec<TextConstraint<'a>>,
}

impl<'a> TextRule<'a> {
    /// Starts a rule for a field value.
    #[must_use]
    pub const fn new(field: FieldPath, value: Option<&'a str>) -> Self {
        Self {
            field,
            value,
            constraints: Vec::new(),
        }
    }

    /// Adds a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: TextConstraint<'a>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a constraint when the condition holds.
    #[must_use]
    pub fn constraint_if(self, condition: bool, constraint: TextConstraint<'a>) -> Self {
        if condition {
            self.constraint(constraint)
        } else {
            self
        }
    }

    /// Requires the value.
    #[must_use]
    pub fn required(self) -> Self {
        self.constraint(TextConstraint::Required)
    }

    /// Requires the value when the condition holds.
    #[must_use]
    pub fn required_if(self, condition: bool) -> Self {
        self.constraint_if(condition, TextConstraint::Required)
    }

    /// Bounds the character count.
    #[must_use]
    pub fn length(self, min: usize, max: usize) -> Self {
        self.constraint(TextConstraint::Length { min, max })
    }

    /// Restricts the characters.
    #[must_use]
    pub fn charset(self, charset: Charset) -> Self {
        self.constraint(TextConstraint::Charset(charset))
    }

    /// Restricts the value to an allow-list.
    #[must_use]
    pub fn one_of(self, allowed: &'a [String]) -> Self {
        self.constraint(TextConstraint::OneOf(allowed))
    }

    /// Requires a full calendar date.
    #[must_use]
    pub fn iso_date(self) -> Self {
        self.constraint(TextConstraint::IsoDate)
    }

    /// Applies the country rules: membership in a non-empty allow-list, or
    /// a three-character code in the VDS character set otherwise.
    #[must_use]
    pub fn country(self, allowed: &'a [String]) -> Self {
        if allowed.is_empty() {
            self.constraint(TextConstraint::CountryCode)
                .charset(Charset::Vds)
        } else {
            self.one_of(allowed)
        }
    }

    /// Applies a presence policy, followed by `checks` unless the field is
    /// disallowed.
    #[must_use]
    pub fn optionality(self, optionality: Optionality, checks: impl FnOnce(Self) -> Self) -> Self {
        match optionality {
            Optionality::Required => checks(self.required()),
            Optionality::Optional => checks(self),
            Optionality::Disallowed => self.constraint(TextConstraint::Absent),
        }
    }

    /// Evaluates every constraint, recording each failure.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Internal` for a constraint that cannot be
    /// evaluated, such as inverted length bounds.
    pub fn check(self, violations: &mut Violations) -> ValidationResult<()> {
        for constraint in &self.constraints {
            if let Some(message) = constraint.check(&self.field, self.value)? {
                violations.push(message);
            }
        }
        Ok(())
    }
}

/// A constraint on an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntConstraint {
    /// The value must equal the given one.
    Equals(i32),
    /// The value must lie within an inclusive range.
    Range {
        /// Lower bound.
        from: i32,
        /// Upper bound.
        to: i32,
    },
}

impl IntConstraint {
    fn check(self, field: &FieldPath, value: i32) -> ValidationResult<Option<String>> {
        let failure = match self {
            Self::Equals(expected) => {
                (value != expected).then(|| messages::invalid_equality(field, value, expected))
            }
            Self::Range { from, to } if from > to => {
                return Err(ValidationError::internal(format!(
                    "value range {from}..={to} for {field} is inverted"
                )));
            }
            Self::Range { from, to } => (!(from..=to).contains(&value))
                .then(|| messages::outside_value_range(field, from, to)),
        };
        Ok(failure)
    }
}

/// Constraints bound to one integer field.
#[derive(Debug, Clone)]
pub struct IntRule {
    field: FieldPath,
    value: i32,
    constraints: Vec<IntConstraint>,
}

impl IntRule {
    /// Starts a rule for a field value.
    #[must_use]
    pub const fn new(field: FieldPath, value: i32) -> Self {
        Self {
            field,
            value,
            constraints: Vec::new(),
        }
    }

    /// Requires an exact value.
    #[must_use]
    pub fn equals(mut self, expected: i32) -> Self {
        self.constraints.push(IntConstraint::Equals(expected));
        self
    }

    /// Requires a value within an inclusive range.
    #[must_use]
    pub fn range(mut self, from: i32, to: i32) -> Self {
        self.constraints.push(IntConstraint::Range { from, to });
        self
    }

    /// Evaluates every constraint, recording each failure.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Internal` for an inverted range.
    pub fn check(self, violations: &mut Violations) -> ValidationResult<()> {
        for constraint in &self.constraints {
            if let Some(message) = constraint.check(&self.field, self.value)? {
                violations.push(message);
            }
        }
        Ok(())
    }
}

//! Dotted field paths used in validation messages.

use std::fmt;

/// Location of a field relative to the document root.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::validation::FieldPath;
///
/// let path = FieldPath::root()
///     .field("data")
///     .field("message")
///     .field("vaccination_events")
///     .index(0)
///     .field("vaccine_brand");
/// assert_eq!(path.to_string(), "data.message.vaccination_events[0].vaccine_brand");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns the path of a named child field.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            return Self(name.to_owned());
        }
        Self(format!("{}.{name}", self.0))
    }

    /// Returns the path of a sequence element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns `true` for the document root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("document");
        }
        f.write_str(&self.0)
    }
}

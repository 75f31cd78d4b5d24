//! Character sets permitted in seal fields.

/// Punctuation permitted in VDS-NC text fields besides ASCII letters,
/// digits and the space character.
const VDS_PUNCTUATION: &str = " !@#$%&'*+/=?^_`{|}~.-";

/// Punctuation permitted in base64url fields besides ASCII letters and
/// digits, including the padding character.
const BASE64URL_PUNCTUATION: &str = "-_=";

/// A permitted character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// Characters permitted in VDS-NC text fields.
    Vds,
    /// The base64url alphabet with padding.
    Base64Url,
}

impl Charset {
    /// Returns `true` if the character belongs to the set.
    #[must_use]
    pub fn allows(self, c: char) -> bool {
        let punctuation = match self {
            Self::Vds => VDS_PUNCTUATION,
            Self::Base64Url => BASE64URL_PUNCTUATION,
        };
        c.is_ascii_alphanumeric() || punctuation.contains(c)
    }

    /// Returns each disallowed character once, in order of first appearance.
    ///
    /// # Examples
    ///
    /// ```
    /// use visible_seal::seal::validation::Charset;
    ///
    /// assert_eq!(Charset::Vds.offending("a<b<c;"), vec!['<', ';']);
    /// assert!(Charset::Base64Url.offending("AbC-_9=").is_empty());
    /// ```
    #[must_use]
    pub fn offending(self, value: &str) -> Vec<char> {
        let mut found: Vec<char> = Vec::new();
        for c in value.chars().filter(|c| !self.allows(*c)) {
            if !found.contains(&c) {
                found.push(c);
            }
        }
        found
    }
}

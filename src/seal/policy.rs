//! Deployment policy for validation and preprocessing.
//!
//! A [`PolicyConfig`] is loaded once at start-up and shared read-only by
//! every pipeline run, typically behind an `Arc`.

use crate::seal::error::ConfigurationError;
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::{Deserialize, Serialize};

/// Tri-state presence policy for conditionally optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optionality {
    /// The field must be present.
    Required,
    /// The field may be present; when present it is checked.
    #[default]
    Optional,
    /// The field must be absent.
    Disallowed,
}

/// Complete policy bundle.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::policy::PolicyConfig;
///
/// let policy = PolicyConfig::from_json_str(
///     r#"{ "validation": { "require_signature": true }, "truncation": { "truncate_by_count": true, "max_doses": 4 } }"#,
/// )
/// .expect("valid policy");
/// assert!(policy.validation.require_signature);
/// assert_eq!(policy.truncation.max_doses, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Validation parameters.
    pub validation: ValidationPolicy,
    /// Dose truncation parameters.
    pub truncation: TruncationPolicy,
}

impl PolicyConfig {
    /// Creates a policy that requires a signature block, for validating
    /// already signed seals.
    #[must_use]
    pub fn signed() -> Self {
        Self {
            validation: ValidationPolicy {
                require_signature: true,
                ..ValidationPolicy::default()
            },
            ..Self::default()
        }
    }

    /// Parses and checks a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Parse`] for malformed JSON and
    /// [`ConfigurationError::Inconsistent`] when [`PolicyConfig::validate`]
    /// rejects the values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let policy: Self = serde_json::from_str(json).map_err(ConfigurationError::parse)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reads and checks a JSON policy file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Read`] when the file cannot be opened,
    /// otherwise the errors of [`PolicyConfig::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigurationError> {
        let contents = read_utf8_file(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks the policy for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Inconsistent`] when the date-of-birth
    /// filler is a digit, a hyphen or whitespace, or when an allow-list
    /// contains an empty entry.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.validation.validate()
    }
}

/// Validation parameters.
///
/// Empty allow-lists leave the corresponding field unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Raise the first failure as an error instead of returning messages.
    pub fail_fast: bool,
    /// Validate the signature block. Disable to validate before signing.
    pub require_signature: bool,
    /// Require the travel document number.
    pub require_unique_identifier: bool,
    /// Presence policy for the additional identifier.
    pub check_additional_identifier: Optionality,
    /// Require the date of birth even when a travel document number is given.
    pub require_date_of_birth: bool,
    /// Filler used for the omitted components of partial dates of birth.
    /// Partial dates are rejected when unset.
    pub date_of_birth_filler: Option<char>,
    /// Presence policy for the due date of the next dose.
    pub check_due_date_of_next_dose: Optionality,
    /// Permitted seal types.
    pub vds_types: Vec<String>,
    /// Permitted signature algorithms.
    pub signing_algorithms: Vec<String>,
    /// Permitted issuing countries.
    pub issuing_countries: Vec<String>,
    /// Permitted vaccine or prophylaxis codes.
    pub vaccines_or_prophylaxes: Vec<String>,
    /// Permitted vaccine brands.
    pub vaccine_brands: Vec<String>,
    /// Permitted disease or agent codes.
    pub diseases_or_agents_targeted: Vec<String>,
    /// Permitted countries of vaccination.
    pub vaccination_countries: Vec<String>,
}

impl ValidationPolicy {
    /// Sets the partial date-of-birth filler.
    #[must_use]
    pub const fn with_date_of_birth_filler(mut self, filler: char) -> Self {
        self.date_of_birth_filler = Some(filler);
        self
    }

    /// Checks the policy for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// See [`PolicyConfig::validate`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(filler) = self.date_of_birth_filler
            && (filler.is_ascii_digit() || filler == '-' || filler.is_whitespace())
        {
            return Err(ConfigurationError::inconsistent(format!(
                "date_of_birth_filler '{filler}' is indistinguishable from date components"
            )));
        }

        let lists = [
            ("vds_types", &self.vds_types),
            ("signing_algorithms", &self.signing_algorithms),
            ("issuing_countries", &self.issuing_countries),
            ("vaccines_or_prophylaxes", &self.vaccines_or_prophylaxes),
            ("vaccine_brands", &self.vaccine_brands),
            ("diseases_or_agents_targeted", &self.diseases_or_agents_targeted),
            ("vaccination_countries", &self.vaccination_countries),
        ];
        for (name, values) in lists {
            if values.iter().any(String::is_empty) {
                return Err(ConfigurationError::inconsistent(format!(
                    "{name} contains an empty entry"
                )));
            }
        }

        Ok(())
    }
}

/// Dose truncation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationPolicy {
    /// Enable truncation by dose count.
    pub truncate_by_count: bool,
    /// Maximum number of doses kept. Zero disables truncation.
    pub max_doses: usize,
}

impl TruncationPolicy {
    /// Creates an enabled truncation policy.
    #[must_use]
    pub const fn max_doses(max_doses: usize) -> Self {
        Self {
            truncate_by_count: true,
            max_doses,
        }
    }

    /// Returns `true` when truncation can change a message.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.truncate_by_count && self.max_doses > 0
    }
}

/// Reads a UTF-8 file relative to its parent directory capability.
pub(crate) fn read_utf8_file(path: &Utf8Path) -> Result<String, ConfigurationError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| ConfigurationError::inconsistent(format!("'{path}' is not a file path")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| ConfigurationError::read(path, err))?;
    dir.read_to_string(file_name)
        .map_err(|err| ConfigurationError::read(path, err))
}

//! Out-of-band context threaded through one pipeline run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Open key/value context for one issuance run.
///
/// Preprocessing records its side effects here and document rendering reads
/// it. The map is owned by exactly one run: it is moved into the pipeline,
/// lent mutably to preprocessing, and moved into the final result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalInformation(BTreeMap<String, Value>);

impl AdditionalInformation {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a value, returning the previous one if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Looks up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a boolean value.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Looks up an unsigned integer value.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for AdditionalInformation {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keys written by dose truncation.
pub mod keys {
    /// Whether truncation changed the dose count.
    pub const IS_TRUNCATED: &str = "IsTruncated";
    /// The configured maximum number of doses.
    pub const MAX_DOSES: &str = "MaxDoses";
    /// Event count before truncation.
    pub const ORIGINAL_EVENT_COUNT: &str = "OriginalEventCount";
    /// Dose count before truncation.
    pub const ORIGINAL_DOSE_COUNT: &str = "OriginalDoseCount";
    /// Event count after truncation.
    pub const TRUNCATED_EVENT_COUNT: &str = "TruncatedEventCount";
    /// Dose count after truncation.
    pub const TRUNCATED_DOSE_COUNT: &str = "TruncatedDoseCount";
}

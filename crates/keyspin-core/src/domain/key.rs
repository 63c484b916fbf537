use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Number of identifier characters retained as the lookup key.
pub const PREFIX_LEN: usize = 6;

/// Normalized identifier prefix used as the lookup key.
///
/// Derived deterministically from a longer caller-supplied identifier; only
/// the leading prefix is kept, so the key itself never stores the full input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LookupKey(String);

impl LookupKey {
    /// Derive a key from a raw identifier.
    ///
    /// Separator characters (spaces and dashes) are skipped, letters are
    /// uppercased, and the first [`PREFIX_LEN`] usable characters form the
    /// key. Anything that is not ASCII alphanumeric or a separator is
    /// rejected.
    pub fn derive(input: &str) -> Result<Self, ValidationError> {
        let mut normalized = String::with_capacity(PREFIX_LEN);
        for (index, ch) in input.chars().enumerate() {
            if normalized.len() == PREFIX_LEN {
                break;
            }
            if ch == ' ' || ch == '-' {
                continue;
            }
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::KeyInvalidChar { ch, index });
            }
            normalized.push(ch.to_ascii_uppercase());
        }

        if normalized.len() < PREFIX_LEN {
            return Err(ValidationError::KeyTooShort {
                len: normalized.len(),
                min: PREFIX_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for LookupKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::derive(&value)
    }
}

impl TryFrom<&str> for LookupKey {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::derive(value)
    }
}

impl From<LookupKey> for String {
    fn from(value: LookupKey) -> Self {
        value.0
    }
}

use serde::{Deserialize, Serialize};

use super::LookupKey;

/// Placeholder rendered for any attribute a provider could not resolve.
pub const UNKNOWN: &str = "Unknown";

/// Canonical lookup result.
///
/// Immutable once constructed; `complete` is computed from the field values
/// at construction and decides whether the record may be cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub key: LookupKey,
    /// `"{key} - {LABEL} - …"` classification line.
    pub summary: String,
    pub secondary: String,
    pub tertiary: String,
    pub complete: bool,
}

impl LookupRecord {
    /// Compose a record from mapped attribute values.
    ///
    /// Labels are joined into the summary line in mapping order. The record
    /// is complete only when every component resolved to something other
    /// than the [`UNKNOWN`] placeholder.
    pub fn compose(
        key: LookupKey,
        labels: &[String],
        secondary: String,
        tertiary: String,
    ) -> Self {
        let mut summary = key.as_str().to_owned();
        if labels.is_empty() {
            summary.push_str(" - ");
            summary.push_str(UNKNOWN);
        } else {
            for label in labels {
                summary.push_str(" - ");
                summary.push_str(label);
            }
        }

        let complete = !labels.is_empty()
            && labels.iter().all(|label| label != UNKNOWN)
            && secondary != UNKNOWN
            && tertiary != UNKNOWN;

        Self {
            key,
            summary,
            secondary,
            tertiary,
            complete,
        }
    }

    /// The total-failure sentinel: every field is the placeholder.
    pub fn unknown(key: LookupKey) -> Self {
        let summary = format!("{} - {UNKNOWN}", key.as_str());
        Self {
            key,
            summary,
            secondary: UNKNOWN.to_owned(),
            tertiary: UNKNOWN.to_owned(),
            complete: false,
        }
    }

    /// Whether at least one attribute resolved to a real value.
    pub fn has_known_field(&self) -> bool {
        self.secondary != UNKNOWN
            || self.tertiary != UNKNOWN
            || self
                .summary
                .split(" - ")
                .skip(1)
                .any(|part| part != UNKNOWN)
    }
}

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::provider::ProviderConfig;

/// Static engine configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Timeout applied to the heavyweight fallback, when one is plugged in.
    #[serde(default = "default_heavyweight_timeout_ms")]
    pub heavyweight_timeout_ms: u64,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for provider in &self.providers {
            provider.validate()?;
            if !seen.insert(provider.id.as_str()) {
                return Err(ValidationError::DuplicateProviderId {
                    id: provider.id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            heavyweight_timeout_ms: default_heavyweight_timeout_ms(),
        }
    }
}

const fn default_heavyweight_timeout_ms() -> u64 {
    45_000
}

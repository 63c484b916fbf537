use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::http_client::HttpMethod;
use crate::ValidationError;

/// Default per-provider request timeout.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Adapter-level error classification.
///
/// Every variant marks the provider unusable for this call; a provider that
/// answered but does not know the key is NOT an error, it is an incomplete
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Network,
    HttpStatus(u16),
    Parse,
}

/// Structured provider error used by engine fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Network,
            message: message.into(),
        }
    }

    pub fn http_status(status: u16) -> Self {
        Self {
            kind: ProviderErrorKind::HttpStatus(status),
            message: format!("upstream returned status {status}"),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Parse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Network => "provider.network",
            ProviderErrorKind::HttpStatus(_) => "provider.http_status",
            ProviderErrorKind::Parse => "provider.parse",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// Where a canonical record attribute comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Top-level key in the provider's JSON response body.
    Path(String),
    /// Fixed literal, independent of the response.
    Constant(String),
}

/// Declarative mapping from a provider response to the canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Classification attributes composed (uppercased) into the summary line.
    pub labels: Vec<FieldSource>,
    pub secondary: FieldSource,
    pub tertiary: FieldSource,
}

impl FieldMapping {
    pub fn new(labels: Vec<FieldSource>, secondary: FieldSource, tertiary: FieldSource) -> Self {
        Self {
            labels,
            secondary,
            tertiary,
        }
    }
}

/// Immutable configuration for one remote lookup provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    /// URL template. A `{key}` placeholder is substituted; a GET template
    /// without one has the key appended after a guaranteed trailing slash.
    pub endpoint: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Optional credentials, merged into headers (GET) or the form body
    /// (POST).
    #[serde(default)]
    pub auth: Option<BTreeMap<String, String>>,
    /// Form field name carrying the key on POST requests.
    #[serde(default = "default_key_param")]
    pub key_param: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    pub fields: FieldMapping,
}

impl ProviderConfig {
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>, fields: FieldMapping) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            auth: None,
            key_param: default_key_param(),
            timeout_ms: default_timeout_ms(),
            fields,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_auth(mut self, auth: BTreeMap<String, String>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyProviderId);
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint {
                value: self.endpoint.clone(),
            });
        }

        if self.fields.labels.is_empty() {
            return Err(ValidationError::NoLabelFields {
                provider: self.id.clone(),
            });
        }

        Ok(())
    }
}

fn default_key_param() -> String {
    String::from("key")
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_MS
}

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{LookupKey, LookupRecord, UNKNOWN};
use crate::http_client::{HttpClient, HttpMethod, HttpRequest};
use crate::provider::{FieldSource, ProviderConfig, ProviderError};

const KEY_PLACEHOLDER: &str = "{key}";

/// Configuration-driven adapter for one remote lookup provider.
///
/// Provider differences (endpoint, transport, credentials, response shape)
/// live entirely in [`ProviderConfig`]; this type owns only the mechanics of
/// building the request and normalizing the response.
pub struct RestProvider {
    config: ProviderConfig,
    http: Arc<dyn HttpClient>,
}

impl RestProvider {
    pub fn new(config: ProviderConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Resolve a key against this provider.
    ///
    /// A reachable provider that does not know the key yields an incomplete
    /// record, never an error; errors mean the provider itself is unusable.
    pub async fn resolve(
        &self,
        key: &LookupKey,
        egress: Option<&str>,
    ) -> Result<LookupRecord, ProviderError> {
        let request = self.build_request(key, egress);
        let response = self.http.execute(request).await.map_err(|error| {
            ProviderError::network(format!("{}: {}", self.config.id, error.message()))
        })?;

        if !response.is_success() {
            return Err(ProviderError::http_status(response.status));
        }

        self.parse_response(key, &response.body)
    }

    fn build_request(&self, key: &LookupKey, egress: Option<&str>) -> HttpRequest {
        let mut request = match self.config.method {
            HttpMethod::Get => {
                let encoded = urlencoding::encode(key.as_str()).into_owned();
                let url = if self.config.endpoint.contains(KEY_PLACEHOLDER) {
                    self.config.endpoint.replace(KEY_PLACEHOLDER, &encoded)
                } else {
                    let mut url = self.config.endpoint.clone();
                    if !url.ends_with('/') {
                        url.push('/');
                    }
                    url.push_str(&encoded);
                    url
                };

                let mut request = HttpRequest::get(url);
                if let Some(auth) = &self.config.auth {
                    for (name, value) in auth {
                        request = request.with_header(name, value);
                    }
                }
                request
            }
            HttpMethod::Post => {
                let mut form = self.config.auth.clone().unwrap_or_default();
                form.insert(self.config.key_param.clone(), key.as_str().to_owned());
                HttpRequest::post(self.config.endpoint.clone()).with_form(form)
            }
        };

        for (name, value) in &self.config.headers {
            request = request.with_header(name, value);
        }
        request = request.with_timeout_ms(self.config.timeout_ms);
        if let Some(egress) = egress {
            request = request.with_egress(egress);
        }

        request
    }

    fn parse_response(&self, key: &LookupKey, body: &str) -> Result<LookupRecord, ProviderError> {
        let data: Value = serde_json::from_str(body).map_err(|error| {
            ProviderError::parse(format!("{}: malformed response body: {error}", self.config.id))
        })?;

        if !data.is_object() {
            return Err(ProviderError::parse(format!(
                "{}: expected a JSON object response",
                self.config.id
            )));
        }

        let labels = self
            .config
            .fields
            .labels
            .iter()
            .map(|source| match extract_field(&data, source) {
                Some(value) => value.to_ascii_uppercase(),
                None => UNKNOWN.to_owned(),
            })
            .collect::<Vec<_>>();

        let secondary = free_text_field(&data, &self.config.fields.secondary);
        let tertiary = free_text_field(&data, &self.config.fields.tertiary);

        Ok(LookupRecord::compose(key.clone(), &labels, secondary, tertiary))
    }
}

fn free_text_field(data: &Value, source: &FieldSource) -> String {
    let Some(raw) = extract_field(data, source) else {
        return UNKNOWN.to_owned();
    };

    let stripped = strip_parenthetical(&raw);
    if stripped.is_empty() {
        UNKNOWN.to_owned()
    } else {
        stripped
    }
}

fn extract_field(data: &Value, source: &FieldSource) -> Option<String> {
    match source {
        FieldSource::Constant(literal) => Some(literal.clone()),
        FieldSource::Path(path) => match data.get(path)? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        },
    }
}

/// Drop parenthesized annotation suffixes from a free-text attribute, along
/// with the whitespace that preceded them.
fn strip_parenthetical(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut depth = 0usize;

    for ch in value.chars() {
        match ch {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => output.push(ch),
            _ => {}
        }
    }

    output.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Adapter contract: request construction, response normalization, and the
//! error taxonomy every provider configuration must obey.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use keyspin_core::{
    FieldMapping, FieldSource, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse,
    LookupKey, ProviderConfig, ProviderErrorKind, RestProvider, UNKNOWN,
};

/// Single-response transport double that records every request it sees.
struct RecordingHttpClient {
    response: Result<HttpResponse, HttpError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    fn success(body: &str) -> Self {
        Self {
            response: Ok(HttpResponse::ok_json(body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: String::new(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failure() -> Self {
        Self {
            response: Err(HttpError::new("upstream timeout")),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

impl HttpClient for RecordingHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        let response = self.response.clone();
        Box::pin(async move { response })
    }

    fn is_mock(&self) -> bool {
        true
    }
}

fn mapping() -> FieldMapping {
    FieldMapping::new(
        vec![
            FieldSource::Path(String::from("type")),
            FieldSource::Path(String::from("scheme")),
        ],
        FieldSource::Path(String::from("bank")),
        FieldSource::Path(String::from("country")),
    )
}

fn key() -> LookupKey {
    LookupKey::derive("453201").expect("valid key")
}

fn adapter(config: ProviderConfig, http: &Arc<RecordingHttpClient>) -> RestProvider {
    RestProvider::new(config, Arc::clone(http) as Arc<dyn HttpClient>)
}

#[tokio::test]
async fn get_appends_key_after_trailing_slash() {
    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup", mapping()),
        &http,
    );

    provider.resolve(&key(), None).await.expect("resolve should succeed");

    let requests = http.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "https://api.acme.test/lookup/453201");
}

#[tokio::test]
async fn get_substitutes_key_placeholder() {
    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/v2/{key}/details", mapping()),
        &http,
    );

    provider.resolve(&key(), None).await.expect("resolve should succeed");

    let requests = http.recorded_requests();
    assert_eq!(requests[0].url, "https://api.acme.test/v2/453201/details");
}

#[tokio::test]
async fn get_merges_auth_map_into_headers() {
    let mut auth = BTreeMap::new();
    auth.insert(String::from("x-api-key"), String::from("secret"));

    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping())
            .with_header("accept", "application/json")
            .with_auth(auth),
        &http,
    );

    provider.resolve(&key(), None).await.expect("resolve should succeed");

    let requests = http.recorded_requests();
    assert_eq!(
        requests[0].headers.get("x-api-key").map(String::as_str),
        Some("secret")
    );
    assert_eq!(
        requests[0].headers.get("accept").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn post_sends_auth_and_key_in_the_form_body() {
    let mut auth = BTreeMap::new();
    auth.insert(String::from("api_token"), String::from("secret"));

    let mut config = ProviderConfig::new("beta", "https://beta.test/query", mapping())
        .with_method(HttpMethod::Post)
        .with_auth(auth);
    config.key_param = String::from("prefix");

    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(config, &http);

    provider.resolve(&key(), None).await.expect("resolve should succeed");

    let requests = http.recorded_requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, "https://beta.test/query");

    let form = requests[0].form.as_ref().expect("form body present");
    assert_eq!(form.get("api_token").map(String::as_str), Some("secret"));
    assert_eq!(form.get("prefix").map(String::as_str), Some("453201"));
}

#[tokio::test]
async fn provider_timeout_reaches_the_transport() {
    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping())
            .with_timeout_ms(5_000),
        &http,
    );

    provider.resolve(&key(), None).await.expect("resolve should succeed");

    assert_eq!(http.recorded_requests()[0].timeout_ms, 5_000);
}

#[tokio::test]
async fn egress_descriptor_reaches_the_transport() {
    let http = Arc::new(RecordingHttpClient::success("{}"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    provider
        .resolve(&key(), Some("http://user:pw@10.0.0.1:8080"))
        .await
        .expect("resolve should succeed");

    assert_eq!(
        http.recorded_requests()[0].egress.as_deref(),
        Some("http://user:pw@10.0.0.1:8080")
    );
}

#[tokio::test]
async fn transport_failure_maps_to_network_error() {
    let http = Arc::new(RecordingHttpClient::failure());
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let error = provider
        .resolve(&key(), None)
        .await
        .expect_err("resolve must fail");

    assert_eq!(error.kind(), ProviderErrorKind::Network);
    assert!(error.message().contains("acme"));
}

#[tokio::test]
async fn non_success_status_maps_to_http_status_error() {
    let http = Arc::new(RecordingHttpClient::status(500));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let error = provider
        .resolve(&key(), None)
        .await
        .expect_err("resolve must fail");

    assert_eq!(error.kind(), ProviderErrorKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let http = Arc::new(RecordingHttpClient::success("not json at all"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let error = provider
        .resolve(&key(), None)
        .await
        .expect_err("resolve must fail");

    assert_eq!(error.kind(), ProviderErrorKind::Parse);
}

#[tokio::test]
async fn non_object_body_maps_to_parse_error() {
    let http = Arc::new(RecordingHttpClient::success("[1, 2, 3]"));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let error = provider
        .resolve(&key(), None)
        .await
        .expect_err("resolve must fail");

    assert_eq!(error.kind(), ProviderErrorKind::Parse);
}

#[tokio::test]
async fn missing_fields_render_as_unknown_not_as_errors() {
    let http = Arc::new(RecordingHttpClient::success(r#"{"scheme": "visa"}"#));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let record = provider
        .resolve(&key(), None)
        .await
        .expect("partial data is not an error");

    assert_eq!(record.summary, "453201 - Unknown - VISA");
    assert_eq!(record.secondary, UNKNOWN);
    assert_eq!(record.tertiary, UNKNOWN);
    assert!(!record.complete);
    assert!(record.has_known_field());
}

#[tokio::test]
async fn label_values_are_uppercased_and_constants_injected() {
    let config = ProviderConfig::new(
        "acme",
        "https://api.acme.test/lookup/",
        FieldMapping::new(
            vec![
                FieldSource::Constant(String::from("STANDARD")),
                FieldSource::Path(String::from("type")),
                FieldSource::Path(String::from("scheme")),
            ],
            FieldSource::Path(String::from("bank")),
            FieldSource::Path(String::from("country")),
        ),
    );

    let http = Arc::new(RecordingHttpClient::success(
        r#"{"scheme": "visa", "type": "credit", "bank": "Acme Bank", "country": "Testland"}"#,
    ));
    let provider = adapter(config, &http);

    let record = provider
        .resolve(&key(), None)
        .await
        .expect("resolve should succeed");

    assert_eq!(record.summary, "453201 - STANDARD - CREDIT - VISA");
    assert!(record.complete);
}

#[tokio::test]
async fn parenthetical_suffix_is_stripped_from_free_text_fields() {
    let http = Arc::new(RecordingHttpClient::success(
        r#"{"scheme": "visa", "type": "credit", "bank": "Acme Bank (formerly Acme S.A.)", "country": "Testland (the Republic)"}"#,
    ));
    let provider = adapter(
        ProviderConfig::new("acme", "https://api.acme.test/lookup/", mapping()),
        &http,
    );

    let record = provider
        .resolve(&key(), None)
        .await
        .expect("resolve should succeed");

    assert_eq!(record.secondary, "Acme Bank");
    assert_eq!(record.tertiary, "Testland");
    assert!(record.complete);
}

#[tokio::test]
async fn numeric_fields_are_rendered_as_text() {
    let config = ProviderConfig::new(
        "acme",
        "https://api.acme.test/lookup/",
        FieldMapping::new(
            vec![FieldSource::Path(String::from("tier"))],
            FieldSource::Path(String::from("bank")),
            FieldSource::Path(String::from("country")),
        ),
    );

    let http = Arc::new(RecordingHttpClient::success(
        r#"{"tier": 2, "bank": "Acme Bank", "country": "Testland"}"#,
    ));
    let provider = adapter(config, &http);

    let record = provider
        .resolve(&key(), None)
        .await
        .expect("resolve should succeed");

    assert_eq!(record.summary, "453201 - 2");
    assert!(record.complete);
}

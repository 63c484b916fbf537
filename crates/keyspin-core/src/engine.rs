use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::RestProvider;
use crate::cache::ResultCache;
use crate::config::EngineConfig;
use crate::domain::{LookupKey, LookupRecord};
use crate::fallback::{HeavyweightResolver, DEFAULT_HEAVYWEIGHT_TIMEOUT};
use crate::http_client::HttpClient;
use crate::registry::ProviderRegistry;
use crate::ValidationError;

/// Per-call options forwarded opaquely to the transport layer.
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Caller-selected network egress descriptor (proxy URL).
    pub egress: Option<String>,
}

impl LookupOptions {
    pub fn with_egress(egress: impl Into<String>) -> Self {
        Self {
            egress: Some(egress.into()),
        }
    }
}

/// Orchestrates one lookup: cache check, provider rotation with failure
/// demotion, optional heavyweight fallback, and the "Unknown" sentinel.
///
/// Constructed once at startup and shared by reference across callers; the
/// registry and cache carry their own synchronization, so `lookup` takes
/// `&self` and may be called from any number of tasks.
pub struct LookupEngine {
    registry: ProviderRegistry,
    cache: ResultCache,
    heavyweight: Option<Arc<dyn HeavyweightResolver>>,
    heavyweight_timeout: Duration,
}

impl LookupEngine {
    pub fn builder() -> LookupEngineBuilder {
        LookupEngineBuilder::default()
    }

    /// Build an engine from a static configuration and a shared transport.
    pub fn from_config(config: &EngineConfig, http: Arc<dyn HttpClient>) -> Self {
        let providers = config
            .providers
            .iter()
            .cloned()
            .map(|provider| Arc::new(RestProvider::new(provider, Arc::clone(&http))))
            .collect::<Vec<_>>();

        Self::builder()
            .providers(providers)
            .heavyweight_timeout(Duration::from_millis(config.heavyweight_timeout_ms))
            .build()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Resolve an identifier to a record.
    ///
    /// The only caller-visible error is a malformed identifier; provider
    /// failures are absorbed, and total exhaustion degrades to the sentinel
    /// record instead of failing.
    pub async fn lookup(
        &self,
        input: &str,
        options: &LookupOptions,
    ) -> Result<LookupRecord, ValidationError> {
        let key = LookupKey::derive(input)?;

        if let Some(record) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "cache hit");
            return Ok(record);
        }

        // Bounded by the configured provider count so rotation wrap-around
        // cannot spin the loop when demotions lag behind.
        let mut tried: HashSet<String> = HashSet::with_capacity(self.registry.configured_len());
        while tried.len() < self.registry.configured_len() {
            let Some(provider) = self.registry.next() else {
                break;
            };
            if !tried.insert(provider.id().to_owned()) {
                break;
            }

            tracing::debug!(key = %key, provider = provider.id(), "querying provider");
            match provider.resolve(&key, options.egress.as_deref()).await {
                Ok(record) => {
                    self.cache.put(record.clone()).await;
                    return Ok(record);
                }
                Err(error) => {
                    tracing::warn!(
                        key = %key,
                        provider = provider.id(),
                        error = %error,
                        "provider failed"
                    );
                    self.registry.mark_failed(provider.id());
                }
            }
        }

        if let Some(heavyweight) = &self.heavyweight {
            tracing::info!(key = %key, "direct providers exhausted, engaging heavyweight fallback");
            match tokio::time::timeout(self.heavyweight_timeout, heavyweight.resolve(&key)).await {
                Ok(Ok(record)) if record.has_known_field() => {
                    self.cache.put(record.clone()).await;
                    return Ok(record);
                }
                Ok(Ok(_)) => {
                    tracing::debug!(key = %key, "heavyweight result carried no known field");
                }
                Ok(Err(error)) => {
                    tracing::warn!(key = %key, error = %error, "heavyweight fallback failed");
                }
                Err(_) => {
                    tracing::warn!(key = %key, "heavyweight fallback timed out");
                }
            }
        }

        Ok(LookupRecord::unknown(key))
    }
}

/// Builder for [`LookupEngine`].
#[derive(Default)]
pub struct LookupEngineBuilder {
    providers: Vec<Arc<RestProvider>>,
    cache: Option<ResultCache>,
    heavyweight: Option<Arc<dyn HeavyweightResolver>>,
    heavyweight_timeout: Option<Duration>,
    readmit_after: Option<Duration>,
}

impl LookupEngineBuilder {
    pub fn provider(mut self, provider: Arc<RestProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(mut self, providers: impl IntoIterator<Item = Arc<RestProvider>>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Inject a shared cache (e.g. to observe it from tests).
    pub fn cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn heavyweight(mut self, resolver: Arc<dyn HeavyweightResolver>) -> Self {
        self.heavyweight = Some(resolver);
        self
    }

    pub fn heavyweight_timeout(mut self, timeout: Duration) -> Self {
        self.heavyweight_timeout = Some(timeout);
        self
    }

    /// Enable time-boxed re-admission of demoted providers.
    pub fn readmit_after(mut self, window: Duration) -> Self {
        self.readmit_after = Some(window);
        self
    }

    pub fn build(self) -> LookupEngine {
        let mut registry = ProviderRegistry::new(self.providers);
        if let Some(window) = self.readmit_after {
            registry = registry.with_readmit_after(window);
        }

        LookupEngine {
            registry,
            cache: self.cache.unwrap_or_default(),
            heavyweight: self.heavyweight,
            heavyweight_timeout: self.heavyweight_timeout.unwrap_or(DEFAULT_HEAVYWEIGHT_TIMEOUT),
        }
    }
}

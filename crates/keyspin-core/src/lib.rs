//! # Keyspin Core
//!
//! Keyed-lookup resolver with multi-provider rotation, caching, and fallback.
//!
//! ## Overview
//!
//! A lookup derives a short normalized key from a caller-supplied identifier
//! and resolves it against an ordered set of remote HTTP providers:
//!
//! - **In-memory caching** of complete results for the process lifetime
//! - **Round-robin provider rotation** continuing from the cursor position
//!   of the previous call, with failing providers removed from rotation
//! - **Heavyweight fallback** through an optional slow last-resort resolver
//!   once every direct provider has failed
//! - **"Unknown" sentinel records** on total exhaustion, never an error
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapter`] | Configuration-driven REST provider adapter |
//! | [`cache`] | Complete-results-only in-memory cache |
//! | [`config`] | Startup configuration loading |
//! | [`domain`] | Lookup key and canonical record |
//! | [`engine`] | Lookup orchestration |
//! | [`error`] | Core error types |
//! | [`fallback`] | Heavyweight resolver contract |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Provider configuration and error taxonomy |
//! | [`registry`] | Rotatable, health-tracked provider collection |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use keyspin_core::{EngineConfig, LookupEngine, LookupOptions, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::load("keyspin.json")?;
//!     let engine = LookupEngine::from_config(&config, Arc::new(ReqwestHttpClient::new()));
//!
//!     let record = engine.lookup("4532015112830366", &LookupOptions::default()).await?;
//!     println!("{}", record.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod cache;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod http_client;
pub mod provider;
pub mod registry;

// Re-export commonly used types at crate root for convenience

pub use adapter::RestProvider;

pub use cache::ResultCache;

pub use config::EngineConfig;

pub use domain::{LookupKey, LookupRecord, PREFIX_LEN, UNKNOWN};

pub use engine::{LookupEngine, LookupEngineBuilder, LookupOptions};

pub use error::{CoreError, ValidationError};

pub use fallback::{HeavyweightResolver, DEFAULT_HEAVYWEIGHT_TIMEOUT};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};

pub use provider::{
    FieldMapping, FieldSource, ProviderConfig, ProviderError, ProviderErrorKind,
    DEFAULT_PROVIDER_TIMEOUT_MS,
};

pub use registry::ProviderRegistry;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::domain::{LookupKey, LookupRecord};
use crate::provider::ProviderError;

/// Generous default timeout for the last-resort resolution path, which is
/// inherently slower than the direct-request providers.
pub const DEFAULT_HEAVYWEIGHT_TIMEOUT: Duration = Duration::from_secs(45);

/// Last-resort resolver invoked only after every direct provider has failed.
///
/// Implementations may drive any slow out-of-band mechanism; the engine makes
/// no assumption beyond this contract and wraps the call in its own timeout.
pub trait HeavyweightResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        key: &'a LookupKey,
    ) -> Pin<Box<dyn Future<Output = Result<LookupRecord, ProviderError>> + Send + 'a>>;
}

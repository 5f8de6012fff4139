//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS client with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::dns::TrustDnsClient;
use crate::error_handling::InitializationError;

/// Initializes the default DNS client used for SOA discovery and as the last-resort
/// resolver.
///
/// Uses the default resolver configuration with short timeouts so a dead upstream
/// fails the query quickly instead of stalling a worker.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` when `timeout_secs` is zero.
pub fn init_resolver(timeout_secs: u64) -> Result<Arc<TrustDnsClient>, InitializationError> {
    if timeout_secs == 0 {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be at least one second".to_string(),
        ));
    }
    Ok(Arc::new(TrustDnsClient::system(Duration::from_secs(
        timeout_secs,
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::DnsClient;

    #[tokio::test]
    async fn test_init_resolver_rejects_zero_timeout() {
        assert!(matches!(
            init_resolver(0),
            Err(InitializationError::DnsResolverError(_))
        ));
    }

    #[tokio::test]
    async fn test_init_resolver_keeps_timeout() {
        let client = init_resolver(2).expect("resolver should initialize");
        assert_eq!(client.timeout(), Duration::from_secs(2));
        assert!(client.nameserver().is_none());
    }
}

//! Rate limiting port
//!
//! The store is a best-effort key/value cache: callers treat every error
//! as advisory and never fail a request over it.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::mock;

/// Rate-limit store errors
#[derive(Debug, Error)]
pub enum RateLimitStoreError {
    /// The store could not be reached
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

/// Best-effort key/value store used for request throttling
#[async_trait]
pub trait RateLimitStore: Send + Sync + 'static {
    /// Returns whether a live marker exists for `key`
    async fn get(&self, key: &str) -> Result<bool, RateLimitStoreError>;

    /// Writes a marker for `key` that expires after `ttl`
    async fn put(&self, key: &str, ttl: Duration) -> Result<(), RateLimitStoreError>;
}

#[cfg(test)]
mock! {
    pub RateLimitStore {}

    #[async_trait]
    impl RateLimitStore for RateLimitStore {
        async fn get(&self, key: &str) -> Result<bool, RateLimitStoreError>;
        async fn put(&self, key: &str, ttl: Duration) -> Result<(), RateLimitStoreError>;
    }
}

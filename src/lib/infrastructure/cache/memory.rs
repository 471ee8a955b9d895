//! In-process rate-limit store
//!
//! A TTL map guarded by a mutex. Markers are only approximate under
//! concurrent access, which is all the rate limit promises.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::rate_limiting::{RateLimitStore, RateLimitStoreError};

/// In-memory [`RateLimitStore`]
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    entries: Mutex<HashMap<String, Instant>>,
}

impl MemoryRateLimitStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn get(&self, key: &str) -> Result<bool, RateLimitStoreError> {
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(expires_at) if *expires_at > Instant::now() => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn put(&self, key: &str, ttl: Duration) -> Result<(), RateLimitStoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        // Sweep dead markers so the map stays bounded by the active window.
        entries.retain(|_, expires_at| *expires_at > now);
        entries.insert(key.to_string(), now + ttl);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_marker_visible_before_expiry() -> TestResult {
        let store = MemoryRateLimitStore::new();

        store.put("contact/203.0.113.9", Duration::from_secs(30)).await?;

        assert!(store.get("contact/203.0.113.9").await?);
        assert!(!store.get("contact/198.51.100.1").await?);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_marker_expires_after_ttl() -> TestResult {
        let store = MemoryRateLimitStore::new();

        store.put("contact/203.0.113.9", Duration::from_secs(30)).await?;

        tokio::time::advance(Duration::from_secs(31)).await;

        assert!(!store.get("contact/203.0.113.9").await?);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_refreshes_the_window() -> TestResult {
        let store = MemoryRateLimitStore::new();

        store.put("contact/203.0.113.9", Duration::from_secs(30)).await?;

        tokio::time::advance(Duration::from_secs(20)).await;
        store.put("contact/203.0.113.9", Duration::from_secs(30)).await?;

        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(store.get("contact/203.0.113.9").await?);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_markers_are_swept_on_put() -> TestResult {
        let store = MemoryRateLimitStore::new();

        store.put("contact/203.0.113.9", Duration::from_secs(30)).await?;
        tokio::time::advance(Duration::from_secs(31)).await;

        store.put("contact/198.51.100.1", Duration::from_secs(30)).await?;

        let entries = store.entries.lock().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("contact/198.51.100.1"));

        Ok(())
    }
}

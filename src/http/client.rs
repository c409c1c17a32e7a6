use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use moka::future::Cache;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::observability::api_metrics;

/// Rate-limited HTTP client wrapping reqwest with a request quota and a
/// short-lived GET cache. Writes must invalidate the affected cache keys;
/// the backend stays the sole source of truth.
#[derive(Debug, Clone)]
pub struct RateLimitedHttpClient {
    http: reqwest::Client,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    cache: Cache<String, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
}

impl RateLimitedHttpClient {
    /// Create a client with the given per-minute quota and burst capacity.
    pub fn new(requests_per_minute: u32, burst: u32) -> Result<Self, reqwest::Error> {
        let per_minute = NonZeroU32::new(requests_per_minute.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let http = reqwest::Client::builder().build()?;

        // GET cache: 60s TTL, small capacity. Moderation lists go stale
        // quickly; anything longer would mask admin actions.
        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(Duration::from_secs(60))
            .build();

        Ok(Self {
            http,
            rate_limiter,
            cache,
        })
    }

    /// The underlying reqwest client for building requests.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Wait for rate-limit permission before issuing a request.
    pub async fn acquire(&self) {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;
        api_metrics().record_request();
    }

    /// Look up a cached GET response body.
    pub async fn cached(&self, key: &str) -> Option<Value> {
        match self.cache.get(key).await {
            Some(entry) => {
                debug!("Cache hit for key: {}", key);
                api_metrics().record_cache_hit();
                Some(entry.data)
            }
            None => {
                api_metrics().record_cache_miss();
                None
            }
        }
    }

    /// Store a GET response body for future reads.
    pub async fn store(&self, key: String, data: Value) {
        self.cache.insert(key, CacheEntry { data }).await;
    }

    /// Invalidate all cached entries whose key contains the pattern.
    /// Called after every write so re-fetches see the backend's state.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|(key, _)| key.contains(pattern))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        for key in keys_to_remove {
            self.cache.invalidate(&key).await;
        }

        debug!("Invalidated cache entries matching pattern: {}", pattern);
    }

    /// Drop every cached entry.
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all();
    }
}

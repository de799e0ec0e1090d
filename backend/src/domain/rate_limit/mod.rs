//! Per-client admission control.
//!
//! Each client key owns a token bucket created lazily on its first request.
//! A background sweeper deletes visitors that have been quiet for longer than
//! the idle timeout; their next request starts from a full bucket again.
//! Accounting is best-effort: concurrent requests from one key race on the
//! same bucket under a single lock and nothing is persisted.

mod bucket;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use self::bucket::TokenBucket;

/// Token refill rate, burst and eviction timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Tokens added per second.
    pub refill_per_second: u32,
    /// Bucket capacity; a fresh visitor may send this many requests at once.
    pub burst: u32,
    /// Period between sweeps of idle visitors.
    pub sweep_interval: Duration,
    /// Quiet time after which a visitor is evicted.
    pub idle_timeout: Duration,
}

impl RateLimitConfig {
    /// Build a config with the default timings.
    ///
    /// A zero burst is raised to one so every fresh visitor can send at least
    /// one request.
    ///
    /// # Examples
    /// ```
    /// use delivery::domain::RateLimitConfig;
    ///
    /// let config = RateLimitConfig::new(5, 0);
    /// assert_eq!(config.burst, 1);
    /// ```
    #[must_use]
    pub fn new(refill_per_second: u32, burst: u32) -> Self {
        Self {
            refill_per_second,
            burst: burst.max(1),
            ..Self::default()
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            refill_per_second: 1,
            burst: 3,
            sweep_interval: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(3 * 60),
        }
    }
}

#[derive(Debug)]
struct Visitor {
    bucket: TokenBucket,
    last_seen: DateTime<Utc>,
}

/// Keyed token-bucket limiter shared by every request handler.
pub struct RateLimiter {
    visitors: Mutex<HashMap<String, Visitor>>,
    clock: Arc<dyn Clock + Send + Sync>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create an empty limiter.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use delivery::domain::{RateLimitConfig, RateLimiter};
    /// use mockable::DefaultClock;
    ///
    /// let limiter = RateLimiter::new(RateLimitConfig::default(), Arc::new(DefaultClock));
    /// assert!(limiter.admit("203.0.113.9"));
    /// assert_eq!(limiter.visitor_count(), 1);
    /// ```
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            visitors: Mutex::new(HashMap::new()),
            clock,
            config,
        }
    }

    /// Limits applied to every visitor.
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Record a request from `client_key` and decide whether it may proceed.
    pub fn admit(&self, client_key: &str) -> bool {
        let now = self.clock.utc();
        let RateLimitConfig {
            refill_per_second,
            burst,
            ..
        } = self.config;

        let mut visitors = self.lock_visitors();
        let visitor = visitors
            .entry(client_key.to_owned())
            .or_insert_with(|| Visitor {
                bucket: TokenBucket::full(burst, now),
                last_seen: now,
            });
        visitor.last_seen = now;
        let admitted = visitor.bucket.try_take(now, refill_per_second, burst);
        drop(visitors);

        if !admitted {
            debug!(client = %client_key, "rate limit exceeded");
        }
        admitted
    }

    /// Evict visitors idle for longer than the configured timeout.
    ///
    /// Returns the number of evicted visitors.
    pub fn sweep(&self) -> usize {
        let now = self.clock.utc();
        let idle = TimeDelta::from_std(self.config.idle_timeout).unwrap_or(TimeDelta::MAX);

        let mut visitors = self.lock_visitors();
        let before = visitors.len();
        visitors.retain(|_, visitor| now.signed_duration_since(visitor.last_seen) <= idle);
        let evicted = before - visitors.len();
        drop(visitors);

        if evicted > 0 {
            debug!(evicted, "evicted idle rate limit visitors");
        }
        evicted
    }

    /// Number of tracked visitors.
    pub fn visitor_count(&self) -> usize {
        self.lock_visitors().len()
    }

    /// Spawn the periodic sweeper on the current Tokio runtime.
    ///
    /// The task holds a weak reference and exits once the limiter is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter: Weak<Self> = Arc::downgrade(self);
        let period = self.config.sweep_interval.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                limiter.sweep();
            }
        })
    }

    fn lock_visitors(&self) -> MutexGuard<'_, HashMap<String, Visitor>> {
        self.visitors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

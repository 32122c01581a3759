//! Per-user, per-endpoint rate limiting
//!
//! Token buckets keyed by `email:endpoint`. Buckets refill continuously;
//! a request that finds the bucket empty is rejected with 429.

use crate::error::AppError;
use dashmap::DashMap;
use std::time::Instant;

#[derive(Clone)]
struct TokenBucket {
    capacity: u32,
    tokens: f64,
    refill_per_sec: f64,
    refilled_at: Instant,
}

impl TokenBucket {
    fn new(capacity: u32, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_per_sec,
            refilled_at: Instant::now(),
        }
    }

    fn try_take(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.refilled_at).as_secs_f64();
        self.tokens = f64::min(
            self.capacity as f64,
            self.tokens + elapsed * self.refill_per_sec,
        );
        self.refilled_at = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

pub struct RateLimiter {
    buckets: DashMap<String, TokenBucket>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Take one token from the bucket for `key`, creating it on first use.
    pub fn check(&self, key: &str, capacity: u32, refill_per_sec: f64) -> Result<(), AppError> {
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(capacity, refill_per_sec));

        if bucket.try_take() {
            Ok(())
        } else {
            Err(AppError::RateLimitExceeded(format!(
                "Too many requests for {}",
                key
            )))
        }
    }
}

// src/rate_limiter.rs
use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;
use crate::errors::RateLimitExceeded;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    consumed: u32,
}

impl Window {
    fn fresh(now: Instant) -> Self {
        Self {
            started_at: now,
            consumed: 0,
        }
    }
}

/// Fixed-window admission gate keyed by an arbitrary string.
///
/// Each key gets `max_points` per `window`. The whole check-and-consume step
/// happens under one lock, so concurrent callers on the same key can never
/// both spend the last point. The number of tracked keys is bounded; the
/// least recently used key is forgotten first and starts over with a full
/// budget if it comes back.
pub struct RateLimiter {
    max_points: u32,
    window: Duration,
    windows: Mutex<LruCache<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_points: u32, window: Duration, max_keys: usize) -> Self {
        let capacity = NonZeroUsize::new(max_keys).unwrap_or(NonZeroUsize::MIN);
        Self {
            max_points,
            window,
            windows: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.max_points,
            Duration::from_secs(config.window_secs),
            config.max_keys,
        )
    }

    /// Spends `cost` points for `key`, or refuses without spending anything.
    /// Never blocks beyond the counter update.
    pub fn admit(&self, key: &str, cost: u32) -> Result<(), RateLimitExceeded> {
        self.admit_at(key, cost, Instant::now())
    }

    pub(crate) fn admit_at(&self, key: &str, cost: u32, now: Instant) -> Result<(), RateLimitExceeded> {
        let mut windows = self.windows.lock();
        let window = windows.get_or_insert_mut(key.to_owned(), || Window::fresh(now));

        let elapsed = now.saturating_duration_since(window.started_at);
        if elapsed >= self.window {
            *window = Window::fresh(now);
        }

        if cost > self.max_points {
            debug!("Cost {} for key {} exceeds the budget of {}", cost, key, self.max_points);
            return Err(RateLimitExceeded { retry_after: None });
        }

        let total = window.consumed.saturating_add(cost);
        if total > self.max_points {
            let retry_after = Some(
                self.window
                    .saturating_sub(now.saturating_duration_since(window.started_at)),
            );
            debug!("Rate limit hit for key {} ({} of {} points used)", key, window.consumed, self.max_points);
            return Err(RateLimitExceeded { retry_after });
        }

        window.consumed = total;
        Ok(())
    }

    /// Points still available to `key` in its current window.
    pub fn remaining(&self, key: &str) -> u32 {
        self.remaining_at(key, Instant::now())
    }

    pub(crate) fn remaining_at(&self, key: &str, now: Instant) -> u32 {
        let windows = self.windows.lock();
        match windows.peek(key) {
            Some(w) if now.saturating_duration_since(w.started_at) < self.window => {
                self.max_points.saturating_sub(w.consumed)
            }
            _ => self.max_points,
        }
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().len()
    }
}

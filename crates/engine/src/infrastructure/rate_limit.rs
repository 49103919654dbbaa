//! Fixed-window rate limiting.
//!
//! One counter per client key, reset when the window end passes. Buckets
//! are never swept; entries accumulate until process restart, which is
//! acceptable at the traffic this service is sized for.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::infrastructure::ports::ClockPort;

#[derive(Debug, Clone)]
struct RateBucket {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// Fixed-window counter keyed by an opaque client identifier.
///
/// The clock is injected so windows can be tested deterministically. The
/// bucket map sits behind a mutex; the check-and-update sequence must be
/// atomic under concurrent requests.
pub struct RateLimiter {
    clock: Arc<dyn ClockPort>,
    buckets: Mutex<HashMap<String, RateBucket>>,
}

impl RateLimiter {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Counts a request against `key`'s current window.
    ///
    /// A missing or expired bucket starts a fresh window with this request
    /// already counted. A full bucket denies the request and reports when
    /// the window resets so the client can schedule a retry.
    pub fn check(&self, key: &str, limit: u32, window: Duration) -> RateDecision {
        let now = self.clock.now();
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        match buckets.get_mut(key) {
            Some(bucket) if bucket.reset_at > now => {
                if bucket.count >= limit {
                    return RateDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at: bucket.reset_at,
                    };
                }
                bucket.count += 1;
                RateDecision {
                    allowed: true,
                    remaining: limit.saturating_sub(bucket.count),
                    reset_at: bucket.reset_at,
                }
            }
            _ => {
                let fresh = RateBucket {
                    count: 1,
                    reset_at: now + window,
                };
                let reset_at = fresh.reset_at;
                buckets.insert(key.to_string(), fresh);
                RateDecision {
                    allowed: true,
                    remaining: limit.saturating_sub(1),
                    reset_at,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::TimeZone;

    fn limiter_at_epoch() -> (Arc<FixedClock>, RateLimiter) {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::at(start));
        let limiter = RateLimiter::new(clock.clone());
        (clock, limiter)
    }

    #[test]
    fn allows_up_to_limit_then_denies() {
        let (_clock, limiter) = limiter_at_epoch();
        let window = Duration::milliseconds(60_000);

        let decisions: Vec<bool> = (0..4)
            .map(|_| limiter.check("gen:10.0.0.1", 3, window).allowed)
            .collect();

        assert_eq!(decisions, vec![true, true, true, false]);
    }

    #[test]
    fn reports_remaining_counts() {
        let (_clock, limiter) = limiter_at_epoch();
        let window = Duration::milliseconds(60_000);

        assert_eq!(limiter.check("k", 3, window).remaining, 2);
        assert_eq!(limiter.check("k", 3, window).remaining, 1);
        assert_eq!(limiter.check("k", 3, window).remaining, 0);
        let denied = limiter.check("k", 3, window);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
    }

    #[test]
    fn denial_reports_existing_reset_time() {
        let (clock, limiter) = limiter_at_epoch();
        let window = Duration::milliseconds(60_000);
        let expected_reset = clock.now() + window;

        limiter.check("k", 1, window);
        let denied = limiter.check("k", 1, window);

        assert!(!denied.allowed);
        assert_eq!(denied.reset_at, expected_reset);
    }

    #[test]
    fn fresh_window_after_reset_elapses() {
        let (clock, limiter) = limiter_at_epoch();
        let window = Duration::milliseconds(60_000);

        for _ in 0..3 {
            limiter.check("k", 3, window);
        }
        assert!(!limiter.check("k", 3, window).allowed);

        clock.advance(Duration::milliseconds(60_001));
        let decision = limiter.check("k", 3, window);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 2);
        assert_eq!(decision.reset_at, clock.now() + window);
    }

    #[test]
    fn keys_are_independent() {
        let (_clock, limiter) = limiter_at_epoch();
        let window = Duration::milliseconds(60_000);

        assert!(limiter.check("gen:a", 1, window).allowed);
        assert!(!limiter.check("gen:a", 1, window).allowed);
        assert!(limiter.check("gen:b", 1, window).allowed);
    }
}

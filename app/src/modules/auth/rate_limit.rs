use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

/// Outcome of a rate limit check
pub enum Decision {
    Allowed,
    /// request count for the window was exceeded, holds the seconds
    /// until the window resets
    Limited { retry_after_secs: i64 },
}

impl Decision {
    pub fn is_limited(&self) -> bool {
        matches!(self, Decision::Limited { .. })
    }
}

/// Seam for the throttling strategy, callers never know which
/// implementation backs it so a shared store can replace the
/// process local one without touching the handlers
pub trait RateLimiter: Send + Sync {
    fn check(&self, key: &str) -> Decision;
}

/// Per key request counter over a fixed time window
///
/// keys are normally client IP addresses, sensitive endpoints such as login
/// and OTP requests get their own limiter instance with its own window
#[derive(Clone)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> FixedWindowLimiter {
        FixedWindowLimiter {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// limiter for credential login attempts, 5 per 15 minutes per key
    pub fn for_login() -> FixedWindowLimiter {
        FixedWindowLimiter::new(5, Duration::minutes(15))
    }

    /// limiter for phone OTP requests, 3 per hour per key
    pub fn for_otp() -> FixedWindowLimiter {
        FixedWindowLimiter::new(3, Duration::hours(1))
    }

    fn check_at(&self, key: &str, now: DateTime<Utc>) -> Decision {
        let mut windows = self.windows.lock().unwrap();

        // expired entries for other keys are dropped lazily so the
        // map does not grow unbounded
        windows.retain(|_, w| now - w.started_at < self.window);

        let window = windows.entry(String::from(key)).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if window.count >= self.max_requests {
            let resets_at = window.started_at + self.window;

            return Decision::Limited {
                retry_after_secs: (resets_at - now).num_seconds().max(0),
            };
        }

        window.count += 1;

        Decision::Allowed
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> Decision {
        self.check_at(key, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_limit_then_blocks() {
        let limiter = FixedWindowLimiter::new(3, Duration::minutes(15));
        let now = Utc::now();

        for _ in 0..3 {
            assert!(!limiter.check_at("1.2.3.4", now).is_limited());
        }

        let decision = limiter.check_at("1.2.3.4", now);
        match decision {
            Decision::Limited { retry_after_secs } => {
                assert!(retry_after_secs > 0 && retry_after_secs <= 15 * 60)
            }
            Decision::Allowed => panic!("expected limit to kick in"),
        }
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = FixedWindowLimiter::new(1, Duration::minutes(15));
        let now = Utc::now();

        assert!(!limiter.check_at("1.1.1.1", now).is_limited());
        assert!(!limiter.check_at("2.2.2.2", now).is_limited());
        assert!(limiter.check_at("1.1.1.1", now).is_limited());
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = FixedWindowLimiter::new(1, Duration::minutes(15));
        let now = Utc::now();

        assert!(!limiter.check_at("1.2.3.4", now).is_limited());
        assert!(limiter.check_at("1.2.3.4", now).is_limited());

        let later = now + Duration::minutes(16);
        assert!(!limiter.check_at("1.2.3.4", later).is_limited());
    }
}

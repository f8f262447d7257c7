//! Sliding-window rate limiter keyed by phone number or user id

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::errors::ServiceError;

pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self::with_window(max_requests, Duration::from_secs(window_secs))
    }

    pub fn with_window(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Record one request for `key`, failing when the window is full
    pub fn check(&self, key: &str) -> Result<(), ServiceError> {
        let mut requests = self
            .requests
            .lock()
            .map_err(|_| ServiceError::Internal("Lock poisoned".to_string()))?;

        let now = Instant::now();
        let times = requests.entry(key.to_string()).or_default();

        // Remove old requests outside the window
        times.retain(|&t| now.duration_since(t) < self.window);

        if times.len() >= self.max_requests as usize {
            let retry_after = times
                .first()
                .map(|t| self.window.saturating_sub(now.duration_since(*t)))
                .unwrap_or(self.window);
            tracing::warn!("Rate limit hit for {} (retry after {:?})", key, retry_after);
            return Err(ServiceError::RateLimited(format!(
                "retry after {}s",
                retry_after.as_secs().max(1)
            )));
        }

        times.push(now);
        Ok(())
    }

    /// Drop keys with no requests inside the window
    pub fn prune(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            let now = Instant::now();
            requests.retain(|_, times| {
                times.retain(|&t| now.duration_since(t) < self.window);
                !times.is_empty()
            });
        }
    }

    /// Number of keys still holding requests
    pub fn tracked(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_per_key() {
        let limiter = RateLimiter::new(2, 60);
        assert!(limiter.check("+254700000001").is_ok());
        assert!(limiter.check("+254700000001").is_ok());
        assert!(matches!(
            limiter.check("+254700000001"),
            Err(ServiceError::RateLimited(_))
        ));
        // Other senders are unaffected
        assert!(limiter.check("+254700000002").is_ok());
    }

    #[test]
    fn test_window_expiry() {
        let limiter = RateLimiter::with_window(1, Duration::from_millis(50));
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_err());
        assert_eq!(limiter.tracked(), 1);

        std::thread::sleep(Duration::from_millis(80));
        limiter.prune();
        assert_eq!(limiter.tracked(), 0);
        // The key is usable again once its window has passed
        assert!(limiter.check("a").is_ok());
    }
}

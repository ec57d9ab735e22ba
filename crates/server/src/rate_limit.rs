//! Fixed-window counter for login attempts, keyed by email.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};

/// Windows are swept once the map grows past this many keys.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    attempts: u32,
}

#[derive(Clone)]
pub struct LoginLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_attempts: u32,
    window: Duration,
}

impl LoginLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self { windows: Arc::new(DashMap::new()), max_attempts, window }
    }

    pub fn from_settings(settings: &configs::AuthSettings) -> Self {
        Self::new(settings.login_max_attempts, Duration::from_secs(settings.login_window_secs))
    }

    /// Count one attempt for `key`; `false` once the window's budget is spent.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        if self.windows.len() > SWEEP_THRESHOLD {
            self.sweep(now);
        }
        let key = key.trim().to_lowercase();
        let mut entry = self.windows.entry(key).or_insert(Window { started: now, attempts: 0 });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, attempts: 0 };
        }
        if entry.attempts >= self.max_attempts {
            warn!(attempts = entry.attempts, "login attempts exceeded");
            return false;
        }
        entry.attempts += 1;
        debug!(attempts = entry.attempts, "login attempt counted");
        true
    }

    fn sweep(&self, now: Instant) {
        let window = self.window;
        self.windows.retain(|_, w| now.duration_since(w.started) < window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixth_attempt_in_window_is_refused() {
        let limiter = LoginLimiter::new(5, Duration::from_secs(900));
        let t0 = Instant::now();
        for _ in 0..5 {
            assert!(limiter.check_at("a@clinic.test", t0));
        }
        assert!(!limiter.check_at("a@clinic.test", t0 + Duration::from_secs(60)));
        assert!(limiter.check_at("b@clinic.test", t0), "other keys are independent");
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = LoginLimiter::new(2, Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.check_at("x@clinic.test", t0));
        assert!(limiter.check_at("x@clinic.test", t0));
        assert!(!limiter.check_at("x@clinic.test", t0 + Duration::from_secs(5)));
        assert!(limiter.check_at("x@clinic.test", t0 + Duration::from_secs(10)));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let limiter = LoginLimiter::new(1, Duration::from_secs(60));
        let t0 = Instant::now();
        assert!(limiter.check_at("Case@Clinic.test", t0));
        assert!(!limiter.check_at("case@clinic.test", t0));
    }
}

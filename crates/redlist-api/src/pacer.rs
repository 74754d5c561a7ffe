//! Request pacing for the Red List API.
//!
//! The registry enforces a per-token rate limit, so every call passes
//! through a [`Pacer`] first. Callers are serialized on an async mutex:
//! two tasks sharing one client never issue requests closer together than
//! the policy allows.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Delay the registry documentation asks clients to keep between calls
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(1500);

/// How requests are spaced out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingPolicy {
    /// Sleep the full duration before every request
    FixedDelay(Duration),
    /// Wait only until the duration has elapsed since the previous request
    MinInterval(Duration),
    /// No spacing at all
    Unthrottled,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::FixedDelay(DEFAULT_REQUEST_DELAY)
    }
}

#[derive(Debug)]
pub struct Pacer {
    policy: PacingPolicy,
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(policy: PacingPolicy) -> Self {
        Self {
            policy,
            last_request: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> PacingPolicy {
        self.policy
    }

    /// Wait until the next request may be sent.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        match self.policy {
            PacingPolicy::FixedDelay(delay) => tokio::time::sleep(delay).await,
            PacingPolicy::MinInterval(interval) => {
                if let Some(previous) = *last {
                    tokio::time::sleep_until(previous + interval).await;
                }
            }
            PacingPolicy::Unthrottled => {}
        }
        *last = Some(Instant::now());
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(PacingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps_before_every_request() {
        let pacer = Pacer::new(PacingPolicy::FixedDelay(Duration::from_millis(1500)));
        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_first_request_is_immediate() {
        let pacer = Pacer::new(PacingPolicy::MinInterval(Duration::from_secs(2)));
        let start = Instant::now();
        pacer.wait().await;
        assert!(start.elapsed() < Duration::from_millis(1));
        pacer.wait().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_min_interval_counts_time_already_spent() {
        let pacer = Pacer::new(PacingPolicy::MinInterval(Duration::from_secs(2)));
        pacer.wait().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let before = Instant::now();
        pacer.wait().await;
        let waited = before.elapsed();
        assert!(waited >= Duration::from_millis(500));
        assert!(waited < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized() {
        let pacer = Arc::new(Pacer::new(PacingPolicy::FixedDelay(Duration::from_secs(1))));
        let start = Instant::now();
        let a = tokio::spawn({
            let pacer = pacer.clone();
            async move { pacer.wait().await }
        });
        let b = tokio::spawn({
            let pacer = pacer.clone();
            async move { pacer.wait().await }
        });
        a.await.unwrap();
        b.await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unthrottled_does_not_wait() {
        let pacer = Pacer::new(PacingPolicy::Unthrottled);
        let start = std::time::Instant::now();
        for _ in 0..10 {
            pacer.wait().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_default_policy() {
        assert_eq!(
            Pacer::default().policy(),
            PacingPolicy::FixedDelay(Duration::from_millis(1500))
        );
    }
}

//! Fixed-delay pacing between enriched items.
//!
//! Not a token bucket: each call simply waits the full interval. The
//! category scanner calls it once per item, after that item is enriched.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sequential pacing with a fixed minimum interval.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    interval: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// A throttle that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Suspend the caller for the configured interval.
    pub async fn throttle(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Like [`Throttle::throttle`], but returns early when `cancel` fires.
    ///
    /// Returns `false` if the wait was cut short by cancellation.
    pub async fn throttle_or_cancel(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = self.throttle() => !cancel.is_cancelled(),
            _ = cancel.cancelled() => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_throttle_waits_interval() {
        let throttle = Throttle::new(Duration::from_millis(50));

        let start = Instant::now();
        throttle.throttle().await;
        throttle.throttle().await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(100), "Pacing not applied: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_disabled_throttle_is_immediate() {
        let throttle = Throttle::disabled();
        let start = Instant::now();
        throttle.throttle().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_cancel_cuts_wait_short() {
        let throttle = Throttle::new(Duration::from_secs(10));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let start = Instant::now();
        assert!(!throttle.throttle_or_cancel(&cancel).await);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_uncancelled_wait_completes() {
        let throttle = Throttle::new(Duration::from_millis(5));
        assert!(throttle.throttle_or_cancel(&CancellationToken::new()).await);
    }
}

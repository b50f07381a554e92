//! Composite throttle enforcing the logical AND of all configured windows.

use std::future::Future;

use parking_lot::Mutex;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

use crate::error::{ClientError, Result};

use super::window::{Admission, RateWindow, WindowConfig};

/// Paces calls so that every configured window's limit is respected.
///
/// One throttle is shared by all logical callers of a client. Admission is
/// all-or-nothing: a call proceeds only once every window has a free slot,
/// and its timestamp is committed to every window within the same lock
/// acquisition. Waiting happens on the tokio timer, never on a thread.
pub struct Throttle {
    windows: Mutex<Vec<RateWindow>>,
    /// Fixed at construction. An empty window set short-circuits `acquire`
    /// without ever touching the lock.
    window_count: usize,
}

impl Throttle {
    /// Build a throttle from validated window configurations.
    pub fn new(configs: Vec<WindowConfig>) -> Self {
        for config in &configs {
            debug!(
                max_calls = config.max_calls(),
                period_ms = config.period().as_millis() as u64,
                "Configured rate window"
            );
        }

        let windows: Vec<RateWindow> = configs.into_iter().map(RateWindow::new).collect();
        let window_count = windows.len();

        Self {
            windows: Mutex::new(windows),
            window_count,
        }
    }

    /// A throttle that admits every call immediately.
    pub fn disabled() -> Self {
        Self::new(Vec::new())
    }

    /// Whether any window is configured.
    pub fn is_enabled(&self) -> bool {
        self.window_count > 0
    }

    /// Number of configured windows.
    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Wait until every configured window admits a call, then claim a slot
    /// in each.
    ///
    /// Dropping the returned future before it resolves claims nothing: the
    /// check and the commit happen synchronously under one lock, with no
    /// await point between them.
    pub async fn acquire(&self) {
        if self.window_count == 0 {
            return;
        }

        loop {
            let now = Instant::now();
            match self.try_admit(now) {
                None => return,
                Some(wait_until) => {
                    trace!(
                        wait_ms = wait_until.saturating_duration_since(now).as_millis() as u64,
                        "All slots taken, waiting for the binding window"
                    );
                    time::sleep_until(wait_until).await;
                }
            }
        }
    }

    /// Like [`acquire`](Self::acquire), aborting with
    /// [`ClientError::Cancelled`] if `cancel` resolves first.
    ///
    /// The signal is checked on entry and raced against every wait, so a
    /// cancelled caller has committed to zero windows.
    pub async fn acquire_with_cancel<F>(&self, cancel: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if self.window_count == 0 {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel => {
                debug!("Throttle wait cancelled before admission");
                Err(ClientError::Cancelled)
            }
            _ = self.acquire() => Ok(()),
        }
    }

    /// Run one admission pass at `now`.
    ///
    /// Peeks every window under the admission lock; only when all of them
    /// agree is the call committed to all of them, still under the same
    /// lock. Otherwise returns the latest `ready_at` among the blocked
    /// windows, the binding constraint the caller must wait out. The lock
    /// is held for the decision only, never across a sleep.
    fn try_admit(&self, now: Instant) -> Option<Instant> {
        let mut windows = self.windows.lock();

        let mut wait_until: Option<Instant> = None;
        for window in windows.iter_mut() {
            if let Admission::Blocked { ready_at } = window.peek(now) {
                wait_until = Some(match wait_until {
                    Some(current) => current.max(ready_at),
                    None => ready_at,
                });
            }
        }

        if wait_until.is_some() {
            return wait_until;
        }

        for window in windows.iter_mut() {
            window.commit(now);
        }
        None
    }

    /// Ledger sizes per window, in configuration order.
    #[cfg(test)]
    fn ledger_lens(&self) -> Vec<usize> {
        self.windows.lock().iter().map(|w| w.ledger_len()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn throttle(rules: &[(u32, u64)]) -> Throttle {
        let configs = rules
            .iter()
            .map(|&(max_calls, period_ms)| {
                WindowConfig::new(max_calls, Duration::from_millis(period_ms)).unwrap()
            })
            .collect();
        Throttle::new(configs)
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_window_delays_second_call() {
        let throttle = throttle(&[(1, 1000)]);
        let start = Instant::now();

        // Call A at t=0 is admitted immediately.
        throttle.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        // Call B issued at t=50ms is held until the first slot expires.
        time::sleep(Duration::from_millis(50)).await;
        throttle.acquire().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "admitted after {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(1100), "over-waited: {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_calls_spaced_by_period() {
        let throttle = throttle(&[(1, 3000)]);
        let start = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_excess_calls_wait_out_the_period() {
        // For (N, D), the (N+1)-th back-to-back call waits at least D.
        let throttle = throttle(&[(3, 500)]);
        let start = Instant::now();

        for _ in 0..4 {
            throttle.acquire().await;
        }

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_config_never_waits() {
        let throttle = Throttle::disabled();
        assert!(!throttle.is_enabled());

        let start = Instant::now();
        for _ in 0..10 {
            throttle.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_composite_waits_for_the_binding_window() {
        // The third call is admitted by the 1s window at t=2000 but the 5s
        // window holds it until its first slot expires.
        let throttle = throttle(&[(1, 1000), (2, 5000)]);
        let start = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;
        throttle.acquire().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(5000), "admitted after {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(5100), "over-waited: {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_is_all_or_nothing() {
        let throttle = throttle(&[(1, 1000), (2, 5000)]);

        throttle.acquire().await;

        // One admission claimed exactly one slot in every window.
        assert_eq!(throttle.ledger_lens(), vec![1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_the_limit() {
        let throttle = Arc::new(throttle(&[(2, 100)]));
        let start = Instant::now();

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let throttle = throttle.clone();
                tokio::spawn(async move {
                    throttle.acquire().await;
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        // Six calls through a 2-per-100ms window need two extra rounds.
        assert!(start.elapsed() >= Duration::from_millis(200));

        // The surviving ledger never holds more than max_calls live entries.
        assert!(throttle.ledger_lens()[0] <= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_commits_nothing() {
        let throttle = throttle(&[(1, 1000)]);

        throttle.acquire().await;

        // The pending caller is cancelled long before the slot frees.
        let result = throttle
            .acquire_with_cancel(time::sleep(Duration::from_millis(100)))
            .await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(throttle.ledger_lens(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_checked_at_entry() {
        let throttle = throttle(&[(1, 1000)]);

        // Slot is free, but an already-fired signal still wins.
        let result = throttle.acquire_with_cancel(std::future::ready(())).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert_eq!(throttle.ledger_lens(), vec![0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_cancel_does_not_block_admission() {
        let throttle = throttle(&[(1, 1000)]);

        let result = throttle
            .acquire_with_cancel(std::future::pending::<()>())
            .await;
        assert!(result.is_ok());
        assert_eq!(throttle.ledger_lens(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_throttle_ignores_cancel_signal() {
        let throttle = Throttle::disabled();

        // No windows means no timing work at all, not even the entry check.
        let result = throttle.acquire_with_cancel(std::future::ready(())).await;
        assert!(result.is_ok());
    }
}

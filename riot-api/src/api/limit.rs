//! Process-wide budget for outbound Riot API calls.
//!
//! The provider enforces two rolling quotas per key: 20 requests in any
//! 10 second span and 100 requests in any 120 second span. Both are hard
//! caps over a *sliding* interval, so admission tracks the timestamp of
//! every reserved call and expires them per-window instead of resetting on
//! a fixed tick.

use std::{collections::VecDeque, sync::Mutex, time::Duration};

use rivals_shared::errors::ApiError;
use tokio::time::Instant;

pub const SHORT_WINDOW: Duration = Duration::from_secs(10);
pub const SHORT_WINDOW_CAP: usize = 20;
pub const LONG_WINDOW: Duration = Duration::from_secs(120);
pub const LONG_WINDOW_CAP: usize = 100;

#[derive(Debug)]
struct SlidingWindow {
    span: Duration,
    cap: usize,
    issued: VecDeque<Instant>,
}

impl SlidingWindow {
    fn new(span: Duration, cap: usize) -> Self {
        Self {
            span,
            cap,
            issued: VecDeque::with_capacity(cap),
        }
    }

    fn prune(&mut self, now: Instant) {
        while let Some(front) = self.issued.front() {
            if now.duration_since(*front) >= self.span {
                self.issued.pop_front();
            } else {
                break;
            }
        }
    }

    /// Admissions left in this window. Only meaningful right after `prune`.
    fn headroom(&self) -> usize {
        self.cap.saturating_sub(self.issued.len())
    }

    /// Time until the oldest recorded call leaves the window.
    fn retry_after(&self, now: Instant) -> Duration {
        self.issued
            .front()
            .map(|front| self.span.saturating_sub(now.duration_since(*front)))
            .unwrap_or(Duration::ZERO)
    }
}

/// Sliding-window reservation guard shared by every caller in the process.
///
/// Reservation is fail-fast: callers that cannot be admitted get
/// [`ApiError::RateLimitExceeded`] with a retry hint and must back off.
/// Nothing is queued and nothing is silently dropped.
#[derive(Debug)]
pub struct RateBudget {
    windows: Mutex<(SlidingWindow, SlidingWindow)>,
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl RateBudget {
    pub fn new() -> Self {
        Self::with_limits(SHORT_WINDOW, SHORT_WINDOW_CAP, LONG_WINDOW, LONG_WINDOW_CAP)
    }

    pub fn with_limits(
        short_span: Duration,
        short_cap: usize,
        long_span: Duration,
        long_cap: usize,
    ) -> Self {
        Self {
            windows: Mutex::new((
                SlidingWindow::new(short_span, short_cap),
                SlidingWindow::new(long_span, long_cap),
            )),
        }
    }

    /// Reserves one call. The check and the timestamp record happen under a
    /// single lock, so two concurrent callers can never both observe "under
    /// cap" and jointly exceed it.
    pub fn try_reserve(&self) -> Result<(), ApiError> {
        self.try_reserve_many(1)
    }

    /// Reserves `n` calls atomically, all of them or none.
    pub fn try_reserve_many(&self, n: usize) -> Result<(), ApiError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate budget lock poisoned");
        let (short, long) = &mut *windows;
        short.prune(now);
        long.prune(now);

        if short.headroom() < n || long.headroom() < n {
            let mut wait = Duration::ZERO;
            if short.headroom() < n {
                wait = wait.max(short.retry_after(now));
            }
            if long.headroom() < n {
                wait = wait.max(long.retry_after(now));
            }
            return Err(ApiError::RateLimitExceeded(wait));
        }

        for _ in 0..n {
            short.issued.push_back(now);
            long.issued.push_back(now);
        }
        Ok(())
    }

    /// How many calls both windows can admit right now. Advisory: another
    /// caller may reserve between this probe and a later `try_reserve`.
    pub fn remaining(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate budget lock poisoned");
        let (short, long) = &mut *windows;
        short.prune(now);
        long.prune(now);
        short.headroom().min(long.headroom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn short_window_caps_at_twenty() {
        let budget = RateBudget::new();

        for _ in 0..SHORT_WINDOW_CAP {
            budget.try_reserve().unwrap();
        }
        assert!(matches!(
            budget.try_reserve(),
            Err(ApiError::RateLimitExceeded(_))
        ));
        assert_eq!(budget.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_is_per_window_not_a_fixed_reset() {
        let budget = RateBudget::new();

        // 10 calls now, 10 calls five seconds later.
        for _ in 0..10 {
            budget.try_reserve().unwrap();
        }
        tokio::time::advance(Duration::from_secs(5)).await;
        for _ in 0..10 {
            budget.try_reserve().unwrap();
        }
        assert!(budget.try_reserve().is_err());

        // Five more seconds: only the first batch has left the 10s window.
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(budget.remaining(), 10);
        for _ in 0..10 {
            budget.try_reserve().unwrap();
        }
        assert!(budget.try_reserve().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn long_window_caps_at_one_hundred() {
        let budget = RateBudget::new();

        // Drain 20 per short window, five short windows in a row.
        for _ in 0..5 {
            for _ in 0..SHORT_WINDOW_CAP {
                budget.try_reserve().unwrap();
            }
            tokio::time::advance(SHORT_WINDOW).await;
        }

        // Short window is clear again but the 120s window is full.
        assert!(matches!(
            budget.try_reserve(),
            Err(ApiError::RateLimitExceeded(_))
        ));

        // Once the earliest batch ages out of 120s, budget returns.
        tokio::time::advance(Duration::from_secs(70)).await;
        assert_eq!(budget.remaining(), SHORT_WINDOW_CAP);
        budget.try_reserve().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn batch_reservation_is_all_or_nothing() {
        let budget = RateBudget::new();

        budget.try_reserve_many(15).unwrap();
        assert!(matches!(
            budget.try_reserve_many(6),
            Err(ApiError::RateLimitExceeded(_))
        ));
        // The failed batch must not have consumed anything.
        assert_eq!(budget.remaining(), 5);
        budget.try_reserve_many(5).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_never_jointly_exceed_the_cap() {
        let budget = Arc::new(RateBudget::new());

        let mut handles = Vec::new();
        for _ in 0..50 {
            let budget = budget.clone();
            handles.push(tokio::spawn(async move { budget.try_reserve().is_ok() }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, SHORT_WINDOW_CAP);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_reports_time_to_next_slot() {
        let budget = RateBudget::new();

        for _ in 0..SHORT_WINDOW_CAP {
            budget.try_reserve().unwrap();
        }
        tokio::time::advance(Duration::from_secs(4)).await;

        match budget.try_reserve() {
            Err(ApiError::RateLimitExceeded(wait)) => {
                assert_eq!(wait, Duration::from_secs(6));
            }
            other => panic!("expected RateLimitExceeded, got {:?}", other),
        }
    }
}
